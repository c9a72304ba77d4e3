use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Cell;
use crate::data::summary::first_rows;
use crate::state::DashboardView;

const ROW_HEIGHT: f32 = 20.0;

/// "Filtered Data" section: a sentence about the view and its first rows.
pub fn filtered_table(ui: &mut Ui, view: &DashboardView, rows: usize) {
    ui.heading("📄 Filtered Data");
    ui.label(format!(
        "Showing {} papers published between {} and {}",
        view.visible_indices.len(),
        view.range.start,
        view.range.end
    ));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(40.0))
        .column(Column::initial(520.0).at_least(120.0).clip(true))
        .column(Column::initial(240.0).at_least(80.0).clip(true))
        .column(Column::remainder().at_least(60.0))
        .header(ROW_HEIGHT, |mut header| {
            for name in ["", "title", "journal", "publication_year"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for (row_idx, record) in first_rows(&view.dataset, &view.visible_indices, rows) {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(RichText::new(row_idx.to_string()).weak());
                    });
                    row.col(|ui| {
                        text_cell(ui, record.title.as_deref());
                    });
                    row.col(|ui| {
                        text_cell(ui, record.journal.as_deref());
                    });
                    row.col(|ui| {
                        ui.label(record.publication_year.to_string());
                    });
                });
            }
        });
}

fn text_cell(ui: &mut Ui, value: Option<&str>) {
    let text = Cell(value).to_string();
    if value.is_some() {
        ui.label(text.as_str()).on_hover_text(text);
    } else {
        ui.label(RichText::new(text).italics().weak());
    }
}
