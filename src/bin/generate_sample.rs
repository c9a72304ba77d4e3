//! Writes a synthetic `cleaned_metadata_sample.csv` (and a Parquet twin) so
//! the explorer can be tried without the real CORD-19 metadata.

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const ROWS: usize = 500;
const CSV_PATH: &str = "cleaned_metadata_sample.csv";
const PARQUET_PATH: &str = "cleaned_metadata_sample.parquet";

const JOURNALS: &[&str] = &[
    "The Lancet",
    "BMJ",
    "Nature",
    "Science",
    "PLoS One",
    "Journal of Virology",
    "Clinical Infectious Diseases",
    "Emerging Infectious Diseases",
    "Viruses",
    "Journal of Medical Virology",
    "Eurosurveillance",
    "JAMA",
    "Cell",
    "bioRxiv",
];

const SUBJECTS: &[&str] = &[
    "SARS-CoV-2", "COVID-19", "coronavirus", "MERS-CoV", "influenza", "respiratory virus",
];
const TOPICS: &[&str] = &[
    "transmission", "vaccine efficacy", "clinical outcomes", "mortality", "antibody response",
    "viral shedding", "public health interventions", "hospital admissions", "genome sequencing",
    "mental health", "school closures", "immune response",
];
const SETTINGS: &[&str] = &[
    "in Wuhan", "in Europe", "among health care workers", "in children", "in older adults",
    "during the pandemic", "in intensive care", "in the community",
];
const KINDS: &[&str] = &[
    "a cohort study", "a systematic review", "a modelling study", "a case series",
    "a cross-sectional survey", "a randomized trial",
];

/// Year weights: the dataset is dominated by 2020 and 2021 papers.
const YEARS: &[(u32, u32)] = &[(2015, 2), (2017, 3), (2019, 5), (2020, 45), (2021, 35), (2022, 10)];

/// Deterministic splitmix64 generator; the sample is identical on every run.
struct SplitMix(u64);

impl SplitMix {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// True with probability `percent / 100`.
    fn chance(&mut self, percent: u64) -> bool {
        self.next() % 100 < percent
    }

    fn year(&mut self) -> u32 {
        let total: u32 = YEARS.iter().map(|&(_, w)| w).sum();
        let mut roll = self.below(total as usize) as u32;
        for &(year, weight) in YEARS {
            if roll < weight {
                return year;
            }
            roll -= weight;
        }
        YEARS[YEARS.len() - 1].0
    }
}

/// One output row; `None` fields are written as empty cells.
#[derive(Debug, Serialize)]
struct SampleRow {
    title: Option<String>,
    journal: Option<String>,
    publication_year: Option<f64>,
    abstract_word_count: usize,
}

fn generate(rng: &mut SplitMix) -> Vec<SampleRow> {
    (0..ROWS)
        .map(|_| {
            let title = format!(
                "{} {} {}: {}",
                rng.pick(TOPICS),
                rng.pick(&["of", "and", "after"]),
                rng.pick(SUBJECTS),
                rng.pick(KINDS),
            );
            let title = format!("{}{} {}", &title[..1].to_uppercase(), &title[1..], rng.pick(SETTINGS));
            SampleRow {
                title: (!rng.chance(3)).then_some(title),
                journal: (!rng.chance(8)).then(|| rng.pick(JOURNALS).to_string()),
                // the cleaned file keeps a few missing years, stored as floats
                publication_year: (!rng.chance(4)).then(|| rng.year() as f64),
                abstract_word_count: 80 + rng.below(300),
            }
        })
        .collect()
}

fn write_csv(rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV output")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, true),
        Field::new("journal", DataType::Utf8, true),
        Field::new("publication_year", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.title.as_deref()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.journal.as_deref()))),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.publication_year))),
        ],
    )
    .context("building record batch")?;

    let file = File::create(PARQUET_PATH).context("creating Parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing Parquet batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SplitMix(19);
    let rows = generate(&mut rng);

    write_csv(&rows)?;
    write_parquet(&rows)?;

    println!("Wrote {} papers to {CSV_PATH} and {PARQUET_PATH}", rows.len());
    Ok(())
}
