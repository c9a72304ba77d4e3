use std::fmt;

use super::model::{PaperDataset, MISSING_YEAR};

// ---------------------------------------------------------------------------
// Year range predicate
// ---------------------------------------------------------------------------

/// Inclusive publication-year window selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: u32,
    pub end: u32,
}

impl YearRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: u32) -> bool {
        self.start <= year && year <= self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Slider bounds
// ---------------------------------------------------------------------------

/// Lowest and highest year the range controls can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: u32,
    pub max: u32,
}

impl YearBounds {
    /// Bounds from the data extent.
    ///
    /// A minimum equal to the missing-year marker is replaced by `floor`, and
    /// the maximum is raised to the minimum when the floor overtakes it.
    pub fn from_dataset(dataset: &PaperDataset, floor: u32) -> Self {
        let (lo, hi) = dataset.year_extent.unwrap_or((MISSING_YEAR, MISSING_YEAR));
        let min = if lo == MISSING_YEAR { floor } else { lo };
        YearBounds {
            min,
            max: hi.max(min),
        }
    }

    /// Fit `range` inside the bounds, keeping `start <= end`.
    pub fn clamp(&self, range: YearRange) -> YearRange {
        let start = range.start.clamp(self.min, self.max);
        let end = range.end.clamp(start, self.max);
        YearRange { start, end }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Indices of papers whose year falls inside `range`, in table order.
pub fn filtered_indices(dataset: &PaperDataset, range: YearRange) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| range.contains(r.publication_year))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PaperRecord;

    fn dataset(years: &[u32]) -> PaperDataset {
        PaperDataset::from_records(
            years
                .iter()
                .map(|&y| PaperRecord::new(Some(format!("paper {y}")), None, y))
                .collect(),
        )
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let ds = dataset(&[2018, 2019, 2020, 2021, 2022]);
        assert_eq!(filtered_indices(&ds, YearRange::new(2019, 2021)), vec![1, 2, 3]);
        assert_eq!(filtered_indices(&ds, YearRange::new(2020, 2020)), vec![2]);
    }

    #[test]
    fn count_matches_predicate_for_every_range() {
        let years = [0, 2019, 2020, 2020, 2021, 2021, 2021, 2022];
        let ds = dataset(&years);
        for a in 2017..=2023 {
            for b in a..=2023 {
                let expected = years.iter().filter(|&&y| a <= y && y <= b).count();
                assert_eq!(filtered_indices(&ds, YearRange::new(a, b)).len(), expected);
            }
        }
    }

    #[test]
    fn narrowing_never_grows_the_view() {
        let ds = dataset(&[2019, 2020, 2020, 2021, 2022, 2022]);
        let mut range = YearRange::new(2019, 2022);
        let mut last = filtered_indices(&ds, range).len();
        while range.start < range.end {
            range.start += 1;
            let now = filtered_indices(&ds, range).len();
            assert!(now <= last);
            last = now;
        }
    }

    #[test]
    fn zero_minimum_uses_floor() {
        let ds = dataset(&[0, 2020, 2022]);
        assert_eq!(
            YearBounds::from_dataset(&ds, 2019),
            YearBounds { min: 2019, max: 2022 }
        );
    }

    #[test]
    fn all_missing_years_collapse_to_floor() {
        let ds = dataset(&[0, 0]);
        assert_eq!(
            YearBounds::from_dataset(&ds, 2019),
            YearBounds { min: 2019, max: 2019 }
        );
    }

    #[test]
    fn default_window_is_clamped_into_bounds() {
        let bounds = YearBounds { min: 2020, max: 2020 };
        assert_eq!(bounds.clamp(YearRange::new(2020, 2021)), YearRange::new(2020, 2020));

        let bounds = YearBounds { min: 2015, max: 2023 };
        assert_eq!(bounds.clamp(YearRange::new(2020, 2021)), YearRange::new(2020, 2021));

        let bounds = YearBounds { min: 2022, max: 2024 };
        assert_eq!(bounds.clamp(YearRange::new(2020, 2021)), YearRange::new(2022, 2022));
    }

    #[test]
    fn display_matches_summary_format() {
        assert_eq!(YearRange::new(2020, 2021).to_string(), "2020 - 2021");
    }
}
