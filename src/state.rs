use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::Vec2;

use crate::cloud::layout::{layout_words, CloudLayout};
use crate::cloud::words::{word_frequencies, CloudContent};
use crate::config::{DashboardConfig, WordCloudConfig};
use crate::data::cache::DatasetCache;
use crate::data::filter::{filtered_indices, YearBounds, YearRange};
use crate::data::loader::LoadError;
use crate::data::model::PaperDataset;
use crate::data::summary::{joined_titles, publications_per_year, top_journals};

// ---------------------------------------------------------------------------
// Derived view of the loaded table
// ---------------------------------------------------------------------------

/// Everything the panels draw, derived from the dataset and the year range.
pub struct DashboardView {
    pub dataset: Arc<PaperDataset>,
    pub bounds: YearBounds,
    pub range: YearRange,

    /// Indices of papers inside `range` (cached).
    pub visible_indices: Vec<usize>,
    pub year_counts: Vec<(u32, usize)>,
    pub top_journals: Vec<(String, usize)>,
    pub cloud: CloudContent,

    /// Built on first draw, dropped whenever `cloud` changes.
    cloud_layout: Option<CloudLayout>,
    top_n: usize,
    max_words: usize,
}

impl DashboardView {
    fn new(dataset: Arc<PaperDataset>, config: &DashboardConfig, range: YearRange) -> Self {
        let bounds = YearBounds::from_dataset(&dataset, config.year_floor);
        let mut view = DashboardView {
            dataset,
            bounds,
            range: bounds.clamp(range),
            visible_indices: Vec::new(),
            year_counts: Vec::new(),
            top_journals: Vec::new(),
            cloud: CloudContent::NoTitles,
            cloud_layout: None,
            top_n: config.top_journals,
            max_words: config.word_cloud.max_words,
        };
        view.refilter();
        view
    }

    /// Recompute the filtered view and every aggregate drawn from it.
    fn refilter(&mut self) {
        let ds = &self.dataset;
        self.visible_indices = filtered_indices(ds, self.range);
        self.year_counts = publications_per_year(ds, &self.visible_indices);
        self.top_journals = top_journals(ds, &self.visible_indices, self.top_n);
        self.cloud = word_frequencies(&joined_titles(ds, &self.visible_indices), self.max_words);
        self.cloud_layout = None;
    }

    /// Cloud layout for the current words, built with `measure` on first use.
    pub fn cloud_layout(
        &mut self,
        config: &WordCloudConfig,
        measure: impl FnMut(&str, f32) -> Vec2,
    ) -> Option<&CloudLayout> {
        let CloudContent::Words(words) = &self.cloud else {
            return None;
        };
        Some(
            self.cloud_layout
                .get_or_insert_with(|| layout_words(words, config, measure)),
        )
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Memoized load of the data file.
    pub cache: DatasetCache,

    /// Present while the cached load succeeded.
    pub view: Option<DashboardView>,

    /// Present while the cached load failed.
    pub load_error: Option<Arc<LoadError>>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            cache: DatasetCache::new(config.data_path.clone()),
            config,
            view: None,
            load_error: None,
        }
    }

    /// Run the memoized load and rebuild the view if the dataset changed.
    ///
    /// Called every frame; only the first call after a (re)load touches disk.
    pub fn ensure_loaded(&mut self) {
        match self.cache.get_or_load() {
            Ok(dataset) => {
                self.load_error = None;
                let current = self.view.as_ref();
                if current.is_some_and(|v| Arc::ptr_eq(&v.dataset, &dataset)) {
                    return;
                }
                let range = current.map_or(self.config.default_range, |v| v.range);
                self.view = Some(DashboardView::new(dataset, &self.config, range));
            }
            Err(e) => {
                self.view = None;
                self.load_error = Some(e);
            }
        }
    }

    /// Apply a new year selection; the view is only rebuilt if it changed.
    pub fn set_year_range(&mut self, range: YearRange) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let range = view.bounds.clamp(range);
        if range == view.range {
            return;
        }
        view.range = range;
        view.refilter();
        log::debug!(
            "Year range {range}: {} of {} papers",
            view.visible_indices.len(),
            view.dataset.len()
        );
    }

    /// Drop the memoized load so the file is read again.
    pub fn reload(&mut self) {
        log::info!("Reloading {}", self.cache.path().display());
        self.cache.invalidate();
        self.ensure_loaded();
    }

    /// Switch to another data file.
    pub fn open_path(&mut self, path: PathBuf) {
        log::info!("Opening {}", path.display());
        self.cache.set_path(path);
        self.ensure_loaded();
    }
}
