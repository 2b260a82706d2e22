use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Default chart colour, `#4f8bff`.
pub const DEFAULT_CHART_COLOR: Color32 = Color32::from_rgb(0x4f, 0x8b, 0xff);

fn to_srgb(color: Color32) -> Srgb {
    Srgb::new(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    )
}

fn from_srgb(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// A pale tint of `base`, used to highlight the maximum of each numeric
/// column in the preview table.
pub fn highlight_for(base: Color32) -> Color32 {
    let mut hsl: Hsl = to_srgb(base).into_color();
    hsl.lightness = 0.85;
    hsl.saturation = hsl.saturation.min(0.8);
    from_srgb(hsl.into_color())
}

/// Black or white, whichever reads better on `background`.
pub fn text_on(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
