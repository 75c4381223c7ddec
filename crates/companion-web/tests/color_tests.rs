// Host-side tests for the pure colour helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod color {
    include!("../src/color.rs");
}

use color::*;

#[test]
fn rgba_formats_css_colour() {
    assert_eq!(rgba([245, 158, 11], 0.5), "rgba(245, 158, 11, 0.500)");
}

#[test]
fn rgba_clamps_alpha() {
    assert_eq!(rgba([0, 0, 0], 1.7), "rgba(0, 0, 0, 1.000)");
    assert_eq!(rgba([0, 0, 0], -0.2), "rgba(0, 0, 0, 0.000)");
    assert_eq!(rgba([1, 2, 3], f32::NAN), "rgba(1, 2, 3, 0.000)");
}

#[test]
fn hex_is_lowercase_and_padded() {
    assert_eq!(hex([0x10, 0xb9, 0x81]), "#10b981");
    assert_eq!(hex([0, 0, 0]), "#000000");
}

#[test]
fn glyph_font_never_collapses() {
    assert_eq!(glyph_font(20.0, 1.1), "22px sans-serif");
    assert_eq!(glyph_font(0.0, 1.0), "1px sans-serif");
}
