use bevy::prelude::*;

/// Host-style color tone filter.
///
/// `tone` is `[r, g, b, gray]` in 0..=255 units. The base colour is first pulled toward
/// its luminance by `gray / 255`, then shifted by the tone channels. Out-of-range tones
/// saturate here: this is the only place tile tone values get clamped.
pub fn apply_color_tone(base: [f32; 3], tone: [f32; 4]) -> [f32; 3] {
    let [r, g, b] = base;
    let desat = (tone[3] / 255.0).clamp(0.0, 1.0);
    let lum = 0.299 * r + 0.587 * g + 0.114 * b;
    let mut out = [0.0; 3];
    for (i, c) in [r, g, b].into_iter().enumerate() {
        let grayed = c + (lum - c) * desat;
        out[i] = (grayed + tone[i] / 255.0).clamp(0.0, 1.0);
    }
    out
}

/// sRGB colour of a layer whose bitmap is `base`, tinted by `tone`, at `alpha` (0..=1).
pub fn toned_color(base: [f32; 3], tone: [f32; 4], alpha: f32) -> Color {
    let [r, g, b] = apply_color_tone(base, tone);
    Color::srgba(r, g, b, alpha.clamp(0.0, 1.0))
}
