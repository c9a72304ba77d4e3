use std::collections::{BTreeMap, HashMap};

use super::model::{PaperDataset, PaperRecord};

/// Row counts per publication year over the filtered view, ascending by year.
pub fn publications_per_year(dataset: &PaperDataset, indices: &[usize]) -> Vec<(u32, usize)> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for &i in indices {
        *counts.entry(dataset.records[i].publication_year).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// The `n` most frequent journals in the filtered view.
///
/// Sorted by count descending; equal counts keep the order in which the
/// journals were first seen. Missing journals are not counted.
pub fn top_journals(dataset: &PaperDataset, indices: &[usize], n: usize) -> Vec<(String, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for journal in indices
        .iter()
        .filter_map(|&i| dataset.records[i].journal.as_deref())
    {
        let count = counts.entry(journal).or_insert_with(|| {
            order.push(journal);
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<(&str, usize)> = order.into_iter().map(|j| (j, counts[j])).collect();
    // stable sort keeps first-seen order among ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(n)
        .map(|(j, c)| (j.to_string(), c))
        .collect()
}

/// The first `n` rows of the filtered view with their source row numbers.
pub fn first_rows<'a>(
    dataset: &'a PaperDataset,
    indices: &'a [usize],
    n: usize,
) -> impl Iterator<Item = (usize, &'a PaperRecord)> + 'a {
    indices
        .iter()
        .take(n)
        .map(move |&i| (i, &dataset.records[i]))
}

/// Non-missing titles of the filtered view joined by single spaces.
pub fn joined_titles(dataset: &PaperDataset, indices: &[usize]) -> String {
    indices
        .iter()
        .filter_map(|&i| dataset.records[i].title.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}
