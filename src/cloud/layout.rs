use eframe::egui::{pos2, vec2, Pos2, Rect, Vec2};

use super::words::WordFrequency;
use crate::config::WordCloudConfig;

/// Gap kept around every word box, in canvas units.
const MARGIN: f32 = 2.0;
/// Radial growth of the search spiral per radian.
const SPIRAL_PITCH: f32 = 4.0;
/// Distance travelled along the spiral between two candidate positions.
const SPIRAL_STEP: f32 = 6.0;

/// A word with its final font size and box on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    /// Position in the frequency ranking, 0 = most frequent.
    pub rank: usize,
    pub font_size: f32,
    /// Box of the text without the margin.
    pub rect: Rect,
}

/// Word positions on a `size`-sized canvas with the origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudLayout {
    pub size: Vec2,
    pub words: Vec<PlacedWord>,
}

/// Place `words` (most frequent first) on the canvas.
///
/// Each word goes to the first point of an outward spiral where its box
/// stays inside the canvas without touching an already placed box. Font
/// sizes follow the relative-scaling rule; a word that does not fit is
/// retried one size smaller, and once the size drops below the minimum no
/// further words are placed. `measure` returns the extent of a text at a
/// given font size.
pub fn layout_words(
    words: &[WordFrequency],
    config: &WordCloudConfig,
    mut measure: impl FnMut(&str, f32) -> Vec2,
) -> CloudLayout {
    let canvas = Rect::from_min_size(Pos2::ZERO, vec2(config.width, config.height));
    let rs = config.relative_scaling;

    let mut placed: Vec<PlacedWord> = Vec::new();
    let mut occupied: Vec<Rect> = Vec::new();
    let mut font_size = (config.height * config.max_font_ratio).round();
    let mut last_weight = 1.0_f32;

    'words: for (rank, word) in words.iter().enumerate() {
        if rank > 0 && rs > 0.0 {
            font_size = ((rs * word.weight / last_weight + (1.0 - rs)) * font_size).round();
        }

        loop {
            if font_size < config.min_font_size {
                break 'words;
            }
            let extent = measure(&word.word, font_size) + Vec2::splat(2.0 * MARGIN);
            if let Some(slot) = find_slot(canvas, extent, &occupied) {
                occupied.push(slot);
                placed.push(PlacedWord {
                    text: word.word.clone(),
                    rank,
                    font_size,
                    rect: slot.shrink(MARGIN),
                });
                break;
            }
            font_size -= 1.0;
        }
        last_weight = word.weight;
    }

    log::debug!("Placed {} of {} words in the cloud", placed.len(), words.len());
    CloudLayout {
        size: canvas.size(),
        words: placed,
    }
}

/// Walk an Archimedean spiral from the canvas centre and return the first
/// free box of `extent`. The spiral is stretched along the longer side.
fn find_slot(canvas: Rect, extent: Vec2, occupied: &[Rect]) -> Option<Rect> {
    if extent.x > canvas.width() || extent.y > canvas.height() {
        return None;
    }

    let center = canvas.center();
    let aspect = canvas.width() / canvas.height();
    let stretch = vec2(aspect.max(1.0), 1.0 / aspect.min(1.0));
    // past this radius every spiral point lies outside the canvas
    let half = canvas.size() / 2.0;
    let max_radius = vec2(half.x / stretch.x, half.y / stretch.y).length();

    let mut theta = 0.0_f32;
    loop {
        let radius = SPIRAL_PITCH * theta;
        if radius > max_radius {
            return None;
        }
        let offset = vec2(
            radius * theta.cos() * stretch.x,
            radius * theta.sin() * stretch.y,
        );
        let candidate = Rect::from_center_size(center + offset, extent);
        if canvas.contains_rect(candidate) && !occupied.iter().any(|r| r.intersects(candidate)) {
            return Some(candidate);
        }
        theta += SPIRAL_STEP / radius.max(SPIRAL_STEP);
    }
}

/// Map a canvas position into `target`, preserving the canvas aspect ratio.
pub fn fit_into(layout_size: Vec2, target: Rect) -> (f32, Pos2) {
    let scale = (target.width() / layout_size.x).min(target.height() / layout_size.y);
    let used = layout_size * scale;
    let origin = pos2(
        target.center().x - used.x / 2.0,
        target.center().y - used.y / 2.0,
    );
    (scale, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::words::{word_frequencies, CloudContent};

    fn approx_measure(text: &str, size: f32) -> Vec2 {
        vec2(text.chars().count() as f32 * size * 0.6, size * 1.2)
    }

    fn words(text: &str) -> Vec<WordFrequency> {
        match word_frequencies(text, 200) {
            CloudContent::Words(w) => w,
            other => panic!("expected words, got {other:?}"),
        }
    }

    fn sample_text() -> String {
        let mut text = String::new();
        for (i, w) in [
            "coronavirus", "pandemic", "respiratory", "vaccine", "transmission", "clinical",
            "outbreak", "patients", "infection", "mortality", "immune", "antibody", "model",
            "china", "review", "analysis", "severe", "acute", "syndrome", "health",
        ]
        .iter()
        .enumerate()
        {
            for _ in 0..(25 - i) {
                text.push_str(w);
                text.push(' ');
            }
        }
        text
    }

    #[test]
    fn placed_words_stay_inside_and_never_overlap() {
        let config = WordCloudConfig::default();
        let layout = layout_words(&words(&sample_text()), &config, approx_measure);
        let canvas = Rect::from_min_size(Pos2::ZERO, vec2(config.width, config.height));

        assert!(!layout.words.is_empty());
        for (i, a) in layout.words.iter().enumerate() {
            assert!(canvas.contains_rect(a.rect), "{} escapes the canvas", a.text);
            for b in &layout.words[i + 1..] {
                assert!(!a.rect.intersects(b.rect), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn most_frequent_word_is_centered_and_largest() {
        let config = WordCloudConfig::default();
        let layout = layout_words(&words(&sample_text()), &config, approx_measure);

        let first = &layout.words[0];
        assert_eq!(first.text, "coronavirus");
        assert_eq!(first.rank, 0);
        assert!((first.rect.center() - pos2(400.0, 200.0)).length() < 1.0);
        for pair in layout.words.windows(2) {
            assert!(pair[0].font_size >= pair[1].font_size);
        }
    }

    #[test]
    fn oversized_words_shrink_until_they_fit() {
        let config = WordCloudConfig {
            width: 100.0,
            height: 50.0,
            ..WordCloudConfig::default()
        };
        let layout = layout_words(&words("pneumonia"), &config, approx_measure);
        let word = &layout.words[0];
        assert!(word.rect.width() <= 100.0 - 2.0 * MARGIN);
        assert!(word.font_size >= config.min_font_size);
    }

    #[test]
    fn placement_stops_when_canvas_is_full() {
        let config = WordCloudConfig {
            width: 60.0,
            height: 30.0,
            ..WordCloudConfig::default()
        };
        let layout = layout_words(&words(&sample_text()), &config, approx_measure);
        assert!(layout.words.len() < 20);
        assert!(layout.words.iter().all(|w| w.font_size >= config.min_font_size));
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        let target = Rect::from_min_size(pos2(10.0, 10.0), vec2(400.0, 400.0));
        let (scale, origin) = fit_into(vec2(800.0, 400.0), target);
        assert_eq!(scale, 0.5);
        assert_eq!(origin, pos2(10.0, 110.0));
    }
}
