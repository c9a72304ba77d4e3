use std::fmt;

// ---------------------------------------------------------------------------
// Publication year coercion
// ---------------------------------------------------------------------------

/// Value stored for rows whose publication year is missing.
pub const MISSING_YEAR: u32 = 0;

/// Turn a possibly-missing numeric year into the stored integer.
///
/// Missing values become [`MISSING_YEAR`]; fractional values are truncated
/// toward zero. Negative and non-finite inputs also map to [`MISSING_YEAR`]
/// so the stored year is always a non-negative integer.
pub fn coerce_year(raw: Option<f64>) -> u32 {
    match raw {
        Some(v) if v.is_finite() && v >= 0.0 => v.trunc().min(u32::MAX as f64) as u32,
        _ => MISSING_YEAR,
    }
}

// ---------------------------------------------------------------------------
// PaperRecord – one row of the metadata table
// ---------------------------------------------------------------------------

/// A single paper (one row of the cleaned metadata file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    pub title: Option<String>,
    pub journal: Option<String>,
    pub publication_year: u32,
}

impl PaperRecord {
    pub fn new(title: Option<String>, journal: Option<String>, publication_year: u32) -> Self {
        Self {
            title: non_empty(title),
            journal: non_empty(journal),
            publication_year,
        }
    }
}

/// Empty cells count as missing.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Display wrapper for an optional text cell.
pub struct Cell<'a>(pub Option<&'a str>);

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "None"),
        }
    }
}

// ---------------------------------------------------------------------------
// PaperDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with its observed year extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperDataset {
    pub records: Vec<PaperRecord>,
    /// Smallest and largest `publication_year`, `None` for an empty table.
    pub year_extent: Option<(u32, u32)>,
}

impl PaperDataset {
    pub fn from_records(records: Vec<PaperRecord>) -> Self {
        let year_extent = records.iter().map(|r| r.publication_year).fold(
            None,
            |acc: Option<(u32, u32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            },
        );
        PaperDataset {
            records,
            year_extent,
        }
    }

    /// Number of papers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_invalid_years_become_zero() {
        assert_eq!(coerce_year(None), 0);
        assert_eq!(coerce_year(Some(f64::NAN)), 0);
        assert_eq!(coerce_year(Some(f64::INFINITY)), 0);
        assert_eq!(coerce_year(Some(-2020.0)), 0);
    }

    #[test]
    fn fractional_years_truncate() {
        assert_eq!(coerce_year(Some(2020.0)), 2020);
        assert_eq!(coerce_year(Some(2021.9)), 2021);
    }

    #[test]
    fn empty_text_is_missing() {
        let r = PaperRecord::new(Some(String::new()), Some("Lancet".into()), 2020);
        assert_eq!(r.title, None);
        assert_eq!(r.journal.as_deref(), Some("Lancet"));
    }

    #[test]
    fn year_extent_tracks_min_and_max() {
        let ds = PaperDataset::from_records(vec![
            PaperRecord::new(None, None, 2021),
            PaperRecord::new(None, None, 0),
            PaperRecord::new(None, None, 2020),
        ]);
        assert_eq!(ds.year_extent, Some((0, 2021)));
        assert_eq!(PaperDataset::from_records(Vec::new()).year_extent, None);
    }

    #[test]
    fn missing_cell_displays_as_none() {
        assert_eq!(Cell(None).to_string(), "None");
        assert_eq!(Cell(Some("BMJ")).to_string(), "BMJ");
    }
}
