use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues. Used to
/// colour categorical bars and word-cloud words.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            hsl_to_color32(hsl)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging map for the correlation heat grid
// ---------------------------------------------------------------------------

/// Map a correlation value in [-1, 1] to a blue-white-red diverging colour.
/// NaN gets a neutral gray so degenerate cells stand apart.
pub fn diverging(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::from_gray(160);
    }
    let t = (value.clamp(-1.0, 1.0) as f32 + 1.0) / 2.0;
    // Hue 230 (blue) through white at the midpoint to hue 5 (red).
    let (hue, saturation) = if t < 0.5 {
        (230.0, 0.75 * (1.0 - t * 2.0))
    } else {
        (5.0, 0.75 * (t * 2.0 - 1.0))
    };
    let lightness = 0.95 - 0.45 * (t * 2.0 - 1.0).abs();
    hsl_to_color32(Hsl::new(hue, saturation, lightness))
}

/// Readable text colour (black or white) for a given cell background.
pub fn contrast_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
