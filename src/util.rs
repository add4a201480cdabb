//! Color conversion helpers.

use crate::style::Color;

/// Channel values of the 6x6x6 color cube in the xterm palette.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// First value and step of the 24-entry gray ramp (indices 232..=255).
const RAMP_START: u8 = 8;
const RAMP_STEP: u8 = 10;

/// Converts a color to the nearest entry of the ANSI 256-color palette.
///
/// Colored values go to the 6x6x6 cube, each channel snapped to the closest
/// cube level. Grays take whichever is closer: a gray of the cube or a step
/// of the 24-level ramp.
///
/// # Example
///
/// ```rust
/// use htstyle::{default_sheet, rgb_to_ansi256, Color};
///
/// let link = default_sheet().style_named("Anchor").and_then(|s| s.color);
/// assert_eq!(link.map(rgb_to_ansi256), Some(21));
///
/// // A legacy 50% gray lands on the ramp.
/// assert_eq!(rgb_to_ansi256(Color::rgb(128, 128, 128)), 244);
/// ```
pub fn rgb_to_ansi256(color: Color) -> u8 {
    let (r, g, b) = color.as_tuple();
    let cube = 16 + 36 * cube_index(r) + 6 * cube_index(g) + cube_index(b);
    if r != g || g != b {
        return cube;
    }

    let ramp = (r.saturating_sub(RAMP_START - RAMP_STEP / 2) / RAMP_STEP).min(23);
    let ramp_value = RAMP_START + RAMP_STEP * ramp;
    let cube_value = CUBE_LEVELS[cube_index(r) as usize];
    if r.abs_diff(ramp_value) < r.abs_diff(cube_value) {
        232 + ramp
    } else {
        cube
    }
}

fn cube_index(channel: u8) -> u8 {
    // Midpoints between neighbouring cube levels.
    match channel {
        0..=47 => 0,
        48..=114 => 1,
        115..=154 => 2,
        155..=194 => 3,
        195..=234 => 4,
        _ => 5,
    }
}

/// Returns the legacy gray level (`0.0` black to `1.0` white) a color
/// corresponds to, if all three channels are equal.
pub fn gray_level(color: Color) -> Option<f32> {
    let (r, g, b) = color.as_tuple();
    if r == g && g == b {
        Some(r as f32 / 255.0)
    } else {
        None
    }
}

/// Short human-readable form of a color: `gray 50%` for grays, otherwise
/// the `#RRGGBB` spelling.
pub fn color_label(color: Color) -> String {
    match gray_level(color) {
        Some(level) => format!("gray {:.0}%", level * 100.0),
        None => color.to_string(),
    }
}
