use std::path::PathBuf;

use crate::data::filter::YearRange;

// ---------------------------------------------------------------------------
// Dashboard defaults
// ---------------------------------------------------------------------------

/// File read from the working directory at startup.
pub const DEFAULT_DATA_FILE: &str = "cleaned_metadata_sample.csv";

/// Slider lower bound used when the data minimum is the "missing year" 0.
pub const YEAR_FLOOR: u32 = 2019;

/// Knobs of the word-cloud renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudConfig {
    /// Virtual canvas size the layout is computed on.
    pub width: f32,
    pub height: f32,
    pub max_words: usize,
    pub min_font_size: f32,
    /// Largest font tried for the most frequent word, as a fraction of height.
    pub max_font_ratio: f32,
    /// 0.0 = size by rank only, 1.0 = size proportional to frequency.
    pub relative_scaling: f32,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            max_words: 200,
            min_font_size: 4.0,
            max_font_ratio: 0.45,
            relative_scaling: 0.5,
        }
    }
}

/// Everything the dashboard treats as a tunable constant.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub year_floor: u32,
    pub default_range: YearRange,
    pub table_rows: usize,
    pub top_journals: usize,
    pub word_cloud: WordCloudConfig,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            year_floor: YEAR_FLOOR,
            default_range: YearRange::new(2020, 2021),
            table_rows: 10,
            top_journals: 10,
            word_cloud: WordCloudConfig::default(),
            window_size: [1280.0, 900.0],
            min_window_size: [640.0, 480.0],
        }
    }
}
