//! Contribution heatmap rendering for 1-bit displays.
//!
//! This crate turns a contribution calendar (weeks of per-day counts) into a
//! monochrome frame and decides when a new frame is worth pushing. It has no
//! knowledge of where the calendar comes from or what panel shows the frame:
//!
//! - [`calendar`]: Snapshot data model (weeks → days → counts)
//! - [`thresholds`]: Count → intensity level classification
//! - [`widgets`]: Cell shader, header and grid layout engine
//! - [`bitmap`]: Packed 1-bit framebuffer implementing `DrawTarget`
//! - [`render`]: Change detection, display sink trait and the render cycle
//! - [`config`]: Panel geometry, layout constants, render configuration
//! - [`colors`], [`styles`]: Ink/paper colors and pre-computed styles
//!
//! # Testing
//!
//! Tests run on the host with `std` enabled (via `cfg_attr`), while library
//! builds stay `no_std` for use on the panel's controller.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod bitmap;
pub mod calendar;
pub mod colors;
pub mod config;
pub mod render;
pub mod styles;
pub mod thresholds;
pub mod widgets;

// Re-export commonly used items
pub use bitmap::{Bitmap, FrameError};
pub use calendar::{CalendarError, CalendarSnapshot, DayRecord, MAX_WEEKS, WeekRecord};
pub use config::RenderConfig;
pub use render::{Cycle, CycleError, DisplaySink, RenderState, run_cycle, should_render};
pub use thresholds::{Intensity, Thresholds, classify};
