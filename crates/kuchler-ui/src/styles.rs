//! Ayu color theme and styling functions for kuchler CLI output.
//!
//! Color source: <https://github.com/ayu-theme/ayu-colors>
//!
//! Growth-form letters are accented, height digits stay plain, and coverage
//! letters are shaded from dense (green) to sparse (gray).

use kuchler_core::codes::CoverageClass;
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

// Coverage shades
const COVER_DENSE: (u8, u8, u8) = (0x7f, 0xd9, 0x62); // #7fd962 - green
const COVER_OPEN: (u8, u8, u8) = (0xe6, 0xb4, 0x50); // #e6b450 - gold
const COVER_SPARSE: (u8, u8, u8) = (0xff, 0x8f, 0x40); // #ff8f40 - orange

pub const ICON_PASS: &str = "\u{2713}"; // ✓

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

fn paint(s: &str, rgb: (u8, u8, u8), color: bool) -> String {
    if color {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    paint(s, rgb, supports_color())
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

/// Renders a section header in uppercase with accent color and bold.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

// ---------------------------------------------------------------------------
// Notation rendering
// ---------------------------------------------------------------------------

fn coverage_rgb(coverage: CoverageClass) -> (u8, u8, u8) {
    match coverage {
        CoverageClass::Continuous | CoverageClass::Interrupted => COVER_DENSE,
        CoverageClass::Porous | CoverageClass::Rare => COVER_OPEN,
        CoverageClass::Low => COVER_SPARSE,
        CoverageClass::Absent => MUTED,
    }
}

/// Renders a coverage code letter in its shade.
pub fn render_coverage(coverage: CoverageClass) -> String {
    color_str(&coverage.to_string(), coverage_rgb(coverage))
}

/// Renders a Küchler formula with growth forms accented and coverage
/// letters shaded. Characters outside the notation pass through unchanged.
pub fn render_formula(formula: &str) -> String {
    render_formula_with(formula, supports_color())
}

fn render_formula_with(formula: &str, color: bool) -> String {
    if !color {
        return formula.to_string();
    }
    let mut out = String::with_capacity(formula.len() * 4);
    for c in formula.chars() {
        let mut buf = [0u8; 4];
        let s = c.encode_utf8(&mut buf);
        if c.is_ascii_uppercase() {
            out.push_str(&s.truecolor(ACCENT.0, ACCENT.1, ACCENT.2).bold().to_string());
        } else if let Some(coverage) = CoverageClass::from_char(c) {
            out.push_str(&paint(s, coverage_rgb(coverage), true));
        } else {
            out.push(c);
        }
    }
    out
}
