//! Glyph constants for the rasterizer.

/// Brightness ramp from darkest to brightest.
pub const SHADE_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Glyph for wireframe surfaces.
pub const WIRE_CHAR: char = '·';
