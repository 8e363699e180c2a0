//! Change detection and the per-cycle render pipeline.
//!
//! This module provides:
//! - [`should_render`] - Whether a fetched total warrants a redraw
//! - [`RenderState`] - The last total that actually reached the display
//! - [`DisplaySink`] - What a panel driver must offer the pipeline
//! - [`run_cycle`] - Compare, lay out, push, advance state
//!
//! # Update Strategy
//!
//! E-paper refreshes are slow and visible, so the panel is only redrawn when
//! the aggregate total changes:
//!
//! | Situation                     | Action                        |
//! |-------------------------------|-------------------------------|
//! | First cycle                   | Render, record total          |
//! | Total unchanged               | No-op                         |
//! | Total changed                 | Render, record total          |
//! | Frame or sink failure         | Return error, state unchanged |
//!
//! State is a plain value passed in and returned, never a global, so a failed
//! cycle simply leaves the caller holding the previous state.

use core::fmt;

use embedded_graphics::prelude::Size;
use log::{debug, info};
use thiserror::Error;

use crate::{
    bitmap::{Bitmap, FrameError},
    calendar::CalendarSnapshot,
    config::RenderConfig,
    widgets::{GridReport, render_calendar},
};

// =============================================================================
// Change Detection
// =============================================================================

/// True on the first cycle or whenever the total differs from the last render.
#[inline]
pub const fn should_render(
    new_total: u32,
    last_rendered: Option<u32>,
) -> bool {
    match last_rendered {
        Some(last) => last != new_total,
        None => true,
    }
}

/// Tracks what the display is currently showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderState {
    /// Total of the last frame pushed to the sink. `None` until the first push.
    last_rendered: Option<u32>,
}

impl RenderState {
    /// State for a freshly started process.
    pub const fn new() -> Self { Self { last_rendered: None } }

    #[inline]
    pub const fn last_rendered(&self) -> Option<u32> { self.last_rendered }

    /// Whether `total` differs from what is on the display.
    #[inline]
    pub const fn needs_render(
        &self,
        total: u32,
    ) -> bool {
        should_render(total, self.last_rendered)
    }

    /// State after a frame with `total` was pushed successfully.
    #[must_use]
    pub const fn rendered(
        self,
        total: u32,
    ) -> Self {
        Self { last_rendered: Some(total) }
    }
}

// =============================================================================
// Display Sink
// =============================================================================

/// A monochrome output device.
///
/// `init` and `cleanup` bracket the process lifetime and are called by the
/// driver loop, not by [`run_cycle`]. Implementations are not assumed to be
/// reentrant; at most one frame is in flight at a time.
pub trait DisplaySink {
    type Error: fmt::Debug + fmt::Display;

    /// Pixel geometry frames must have.
    fn geometry(&self) -> Size;

    /// Prepare the device, typically clearing it to paper.
    fn init(&mut self) -> Result<(), Self::Error> { Ok(()) }

    /// Take ownership of a finished frame and show it.
    fn display(
        &mut self,
        frame: Bitmap,
    ) -> Result<(), Self::Error>;

    /// Release the device on shutdown.
    fn cleanup(&mut self) -> Result<(), Self::Error> { Ok(()) }
}

// =============================================================================
// Render Cycle
// =============================================================================

/// Why a cycle failed. The caller's [`RenderState`] is still valid.
#[derive(Debug, Error)]
pub enum CycleError<E> {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("display sink failed: {0}")]
    Sink(E),
}

/// What a successful cycle did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// Total matched the display; nothing was drawn or pushed.
    Unchanged,
    /// A new frame was pushed to the sink.
    Rendered(GridReport),
}

/// Run one polling cycle against an already-fetched calendar.
///
/// Returns the state to carry into the next cycle. On error nothing is
/// returned, so the next cycle compares against the previous state and retries.
pub fn run_cycle<S>(
    sink: &mut S,
    calendar: &CalendarSnapshot,
    config: &RenderConfig<'_>,
    state: RenderState,
) -> Result<(RenderState, Cycle), CycleError<S::Error>>
where
    S: DisplaySink,
{
    let total = calendar.total_contributions();
    if !state.needs_render(total) {
        debug!("total unchanged at {total}, display left as is");
        return Ok((state, Cycle::Unchanged));
    }

    let mut frame = Bitmap::new(sink.geometry())?;
    let report = render_calendar(&mut frame, calendar, config).unwrap_or_else(|never| match never {});
    sink.display(frame).map_err(CycleError::Sink)?;

    match state.last_rendered() {
        Some(previous) => info!("rendered {total} contributions (was {previous})"),
        None => info!("rendered {total} contributions"),
    }
    Ok((state.rendered(total), Cycle::Rendered(report)))
}

// =============================================================================
// Unit Tests
// =============================================================================
