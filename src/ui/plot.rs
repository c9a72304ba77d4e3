use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{generate_palette, YEAR_BAR};
use crate::state::DashboardView;

const CHART_HEIGHT: f32 = 320.0;
/// Journal names longer than this are cut on the axis (full name on hover).
const MAX_LABEL_CHARS: usize = 28;

// ---------------------------------------------------------------------------
// Publications per year
// ---------------------------------------------------------------------------

/// Vertical bar chart of the number of papers per year in the view.
pub fn year_chart(ui: &mut Ui, view: &DashboardView) {
    ui.heading("📈 Publications by Year");

    let bars: Vec<Bar> = view
        .year_counts
        .iter()
        .map(|&(year, count)| {
            Bar::new(year as f64, count as f64)
                .width(0.8)
                .name(year.to_string())
        })
        .collect();

    static_plot("year_chart")
        .x_axis_label("Year")
        .y_axis_label("Count")
        .x_axis_formatter(|mark: GridMark, _range| whole_number(mark.value).unwrap_or_default())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Publications by Year")
                    .color(YEAR_BAR),
            );
        });
}

// ---------------------------------------------------------------------------
// Top journals
// ---------------------------------------------------------------------------

/// Horizontal bar chart of the most frequent journals, largest at the bottom.
pub fn journal_chart(ui: &mut Ui, view: &DashboardView) {
    ui.heading("🏢 Top Journals");

    let palette = generate_palette(view.top_journals.len());
    let bars: Vec<Bar> = view
        .top_journals
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((journal, count), color))| {
            Bar::new(slot_of(i), *count as f64)
                .width(0.7)
                .name(journal)
                .fill(color)
        })
        .collect();

    // axis position → label, bottom of the chart first
    let labels: Vec<String> = view
        .top_journals
        .iter()
        .map(|(journal, _)| short_label(journal))
        .collect();

    static_plot("journal_chart")
        .x_axis_label("Number of Publications")
        .y_axis_formatter(move |mark: GridMark, _range| {
            whole_number(mark.value)
                .and_then(|_| rank_of(mark.value, labels.len()))
                .and_then(|rank| labels.get(rank).cloned())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Top Journals"));
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A plot that does not pan or zoom, like a rendered figure.
fn static_plot(id: &str) -> Plot<'_> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
}

/// Axis position of the journal with rank `i` (rank 0 nearest the axis origin).
fn slot_of(i: usize) -> f64 {
    i as f64
}

/// Inverse of [`slot_of`] for `n` bars; `None` outside the bars.
fn rank_of(value: f64, n: usize) -> Option<usize> {
    let slot = value.round();
    if slot < 0.0 || slot >= n as f64 {
        return None;
    }
    Some(slot as usize)
}

/// Label for integral grid marks only.
fn whole_number(value: f64) -> Option<String> {
    (value.fract().abs() < 1e-9).then(|| format!("{}", value.round() as i64))
}

fn short_label(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL_CHARS {
        name.to_string()
    } else {
        let cut: String = name.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{cut}…")
    }
}
