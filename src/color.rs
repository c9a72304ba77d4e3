use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Lch, Mix, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Fill of the publications-per-year bars.
pub const YEAR_BAR: Color32 = Color32::from_rgb(31, 119, 180);

/// Background behind the word cloud.
pub const CLOUD_BACKGROUND: Color32 = Color32::WHITE;

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            to_color32(Hsl::new(hue, 0.6, 0.45).into_color())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Word colours
// ---------------------------------------------------------------------------

/// Dark purple → teal → green, readable on a white background.
const WORD_STOPS: [(f32, f32, f32); 3] = [
    (0.267, 0.005, 0.329),
    (0.128, 0.567, 0.551),
    (0.369, 0.788, 0.383),
];

/// Colour at `t` in `[0, 1]` along the word gradient, interpolated in LCh.
pub fn word_gradient(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0) * (WORD_STOPS.len() - 1) as f32;
    let i = (t.floor() as usize).min(WORD_STOPS.len() - 2);
    let from: Lch = srgb(WORD_STOPS[i]).into_color();
    let to: Lch = srgb(WORD_STOPS[i + 1]).into_color();
    to_color32(from.mix(to, t - i as f32).into_color())
}

/// Colour of the word with the given frequency rank.
///
/// Ranks are spread over the gradient by the golden ratio so neighbouring
/// words get clearly different shades.
pub fn word_color(rank: usize) -> Color32 {
    const GOLDEN: f32 = 0.618_034;
    word_gradient((rank as f32 * GOLDEN).fract())
}

fn srgb((r, g, b): (f32, f32, f32)) -> Srgb {
    Srgb::new(r, g, b)
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(10);
        assert_eq!(p.len(), 10);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn gradient_hits_its_end_stops() {
        let start = word_gradient(0.0);
        assert!(start.r().abs_diff(68) <= 1 && start.b().abs_diff(84) <= 1);
        let end = word_gradient(1.0);
        assert!(end.g().abs_diff(200) <= 2);
    }

    #[test]
    fn neighbouring_ranks_differ() {
        assert_ne!(word_color(0), word_color(1));
        assert_ne!(word_color(1), word_color(2));
    }
}
