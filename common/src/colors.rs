//! Color constants for the 1-bit heatmap.
//!
//! The target panel has two states per pixel. `BinaryColor::On` is ink (dark on
//! e-paper) and `BinaryColor::Off` is bare paper. Every drawing routine in this
//! crate goes through these names so the polarity lives in one place.
//!
//! Sinks that talk to hardware with the opposite convention (Waveshare panels
//! expect `1` for white) invert when packing their transfer buffer.

use embedded_graphics::pixelcolor::BinaryColor;

/// Foreground. Cell outlines, stipple dots, solid fills, text and rules.
pub const INK: BinaryColor = BinaryColor::On;

/// Background. The cleared frame and empty cell interiors.
pub const PAPER: BinaryColor = BinaryColor::Off;
