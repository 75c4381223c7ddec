/// CSS colour string for an sRGB triple at the given opacity.
#[inline]
pub fn rgba(rgb: [u8; 3], alpha: f32) -> String {
    let a = if alpha.is_finite() {
        alpha.clamp(0.0, 1.0)
    } else {
        0.0
    };
    format!("rgba({}, {}, {}, {:.3})", rgb[0], rgb[1], rgb[2], a)
}

#[inline]
pub fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Font size in CSS px for a glyph drawn inside a disc of `radius`.
#[inline]
pub fn glyph_font(radius: f32, factor: f32) -> String {
    let px = (radius * factor).max(1.0).round() as u32;
    format!("{px}px sans-serif")
}
