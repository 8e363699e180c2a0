//! Pre-computed static text and primitive styles.
//!
//! Every style used by the heatmap is a `const`, so drawing code never builds
//! style objects at render time.
//!
//! # Fonts
//!
//! All text uses `ProFont` bitmap fonts. At 250×122 the header needs to stay
//! inside a 20 px band and the axis labels inside one 12 px grid row:
//!
//! | Use      | Font           | Glyph cell |
//! |----------|----------------|------------|
//! | Title    | `ProFont` 12pt | 8×15       |
//! | Summary  | `ProFont` 10pt | 7×13       |
//! | Weekdays | `ProFont` 9pt  | 6×11       |

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder},
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_9_POINT, PROFONT_10_POINT, PROFONT_12_POINT};

use crate::colors::{INK, PAPER};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Left-aligned, positioned by the glyph box's top edge. Header text.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Left-aligned, positioned by the vertical middle. Weekday labels on a grid row.
pub const MIDDLE_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Subject label in the header.
pub const TITLE_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_12_POINT, INK);

/// Right-aligned "<total> contrib / <days>d" summary.
pub const SUMMARY_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_10_POINT, INK);

/// Weekday axis labels.
pub const AXIS_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_9_POINT, INK);

// =============================================================================
// Primitive Styles
// =============================================================================

/// One pixel rule under the header.
pub const RULE_STYLE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(INK, 1);

/// Cell border: ink outline around a paper interior.
pub const CELL_OUTLINE_STYLE: PrimitiveStyle<BinaryColor> = PrimitiveStyleBuilder::new()
    .stroke_color(INK)
    .stroke_width(1)
    .fill_color(PAPER)
    .build();

/// Solid interior for the busiest days.
pub const CELL_FILL_STYLE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(INK);
