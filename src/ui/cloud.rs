use eframe::egui::{pos2, vec2, Align2, Color32, FontId, RichText, Sense, Ui};

use crate::cloud::layout::fit_into;
use crate::cloud::words::CloudContent;
use crate::color::{word_color, CLOUD_BACKGROUND};
use crate::config::WordCloudConfig;
use crate::state::DashboardView;

// ---------------------------------------------------------------------------
// Word cloud of titles
// ---------------------------------------------------------------------------

/// Render the word cloud of the view's titles, or a message when there is
/// nothing to draw.
pub fn word_cloud(ui: &mut Ui, view: &mut DashboardView, config: &WordCloudConfig) {
    ui.heading("☁️ Word Cloud of Titles");

    match &view.cloud {
        CloudContent::NoTitles => {
            ui.label("No titles available for the selected filters.");
            return;
        }
        CloudContent::NoWords => {
            ui.label("Titles in the selected range only contain common words.");
            return;
        }
        CloudContent::Words(_) => {}
    }

    let ctx = ui.ctx().clone();
    let Some(layout) = view.cloud_layout(config, |text, size| {
        ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), FontId::proportional(size), Color32::BLACK)
                .size()
        })
    }) else {
        return;
    };

    let width = ui.available_width();
    let height = width * layout.size.y / layout.size.x;
    let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 4.0, CLOUD_BACKGROUND);

    let placed = layout.words.len();
    let (scale, origin) = fit_into(layout.size, rect);
    for word in &layout.words {
        let center = word.rect.center();
        painter.text(
            pos2(origin.x + center.x * scale, origin.y + center.y * scale),
            Align2::CENTER_CENTER,
            &word.text,
            FontId::proportional(word.font_size * scale),
            word_color(word.rank),
        );
    }

    let caption = match &view.cloud {
        CloudContent::Words(words) => format!(
            "Common Words in Paper Titles: {} shown, most frequent \"{}\" ({}×)",
            placed,
            words[0].word,
            words[0].count
        ),
        _ => String::new(),
    };
    ui.label(RichText::new(caption).small().weak());
}
