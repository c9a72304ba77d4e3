use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::filter::YearRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filters and summary
// ---------------------------------------------------------------------------

/// Render the sidebar: year range controls followed by the summary lines.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = &state.view else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.heading("Filters");
    ui.separator();

    let bounds = view.bounds;
    let mut range = view.range;
    ui.label("Select publication year range");
    let from_changed = ui
        .add(Slider::new(&mut range.start, bounds.min..=bounds.max).text("From"))
        .changed();
    let to_changed = ui
        .add(Slider::new(&mut range.end, bounds.min..=bounds.max).text("To"))
        .changed();

    if from_changed || to_changed {
        state.set_year_range(reorder(range, from_changed));
    }

    let Some(view) = &state.view else {
        return;
    };
    ui.add_space(12.0);
    ui.heading("Summary");
    ui.separator();
    ui.label(format!("Total papers: {}", view.dataset.len()));
    ui.label(format!("Filtered papers: {}", view.visible_indices.len()));
    ui.label(format!("Date range: {}", view.range));
}

// ---------------------------------------------------------------------------
// Central panel – header, error screen
// ---------------------------------------------------------------------------

/// Title and one-line description at the top of the page.
pub fn page_header(ui: &mut Ui) {
    ui.heading(RichText::new("CORD-19 Data Explorer").size(28.0).strong());
    ui.label("Exploring a sample of COVID-19 research papers metadata");
    ui.add_space(8.0);
}

/// Shown instead of every other panel when the data file could not be read.
pub fn error_screen(ui: &mut Ui, state: &AppState) {
    let Some(err) = &state.load_error else {
        return;
    };
    ui.add_space(8.0);
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(255, 235, 235))
        .show(ui, |ui: &mut Ui| {
            // alternate form prints the whole context chain of parse errors
            ui.label(RichText::new(format!("{err:#}")).color(Color32::DARK_RED).strong());
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.cache.path().display().to_string());

        if let Some(view) = &state.view {
            ui.separator();
            ui.label(format!(
                "{} papers loaded, {} in {}",
                view.dataset.len(),
                view.visible_indices.len(),
                view.range
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open paper metadata")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}

/// Keep `range` ordered after one of its ends moved: dragging one handle
/// past the other pushes the other one along.
pub fn reorder(range: YearRange, start_moved: bool) -> YearRange {
    if range.start <= range.end {
        range
    } else if start_moved {
        YearRange::new(range.start, range.start)
    } else {
        YearRange::new(range.end, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_start_past_end_drags_end() {
        assert_eq!(reorder(YearRange::new(2022, 2020), true), YearRange::new(2022, 2022));
    }

    #[test]
    fn moving_end_below_start_drags_start() {
        assert_eq!(reorder(YearRange::new(2022, 2020), false), YearRange::new(2020, 2020));
    }

    #[test]
    fn ordered_range_is_untouched() {
        assert_eq!(reorder(YearRange::new(2020, 2021), true), YearRange::new(2020, 2021));
    }
}
