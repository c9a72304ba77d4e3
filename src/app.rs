use eframe::egui::{self, ScrollArea};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{cloud, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
}

impl ExplorerApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Memoized: only the first frame after a (re)load reads the file.
        self.state.ensure_loaded();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and summary ----
        if self.state.view.is_some() {
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: table, charts, word cloud ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.load_error.is_some() {
                panels::error_screen(ui, &self.state);
                return;
            }

            let AppState { config, view, .. } = &mut self.state;
            let Some(view) = view.as_mut() else {
                return;
            };

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::page_header(ui);
                    table::filtered_table(ui, view, config.table_rows);
                    ui.add_space(16.0);

                    ui.columns(2, |columns| {
                        plot::year_chart(&mut columns[0], view);
                        plot::journal_chart(&mut columns[1], view);
                    });
                    ui.add_space(16.0);

                    cloud::word_cloud(ui, view, &config.word_cloud);
                });
        });
    }
}
