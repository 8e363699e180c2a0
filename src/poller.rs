//! Poll loop: fetch, render if the total moved, sleep, repeat.
//!
//! The first cycle runs immediately. A failed fetch or push is logged and the
//! render state is kept, so the next poll retries against what the panel is
//! actually showing. The stop flag is checked between cycles and while
//! sleeping; a render in progress always finishes.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::{Duration, Instant},
};

use etch_common::{Cycle, CycleError, DisplaySink, RenderConfig, RenderState, run_cycle};
use log::{debug, error, info};
use thiserror::Error;

use crate::{
    config::STOP_CHECK_INTERVAL,
    source::{CalendarSource, SourceError},
};

#[derive(Debug, Error)]
pub enum PollError<E> {
    #[error("fetch failed: {0}")]
    Fetch(#[from] SourceError),
    #[error(transparent)]
    Render(CycleError<E>),
}

pub struct Poller<'a, S, K> {
    source: S,
    sink: K,
    config: RenderConfig<'a>,
    interval: Duration,
    state: RenderState,
}

impl<'a, S, K> Poller<'a, S, K>
where
    S: CalendarSource,
    K: DisplaySink,
{
    pub fn new(
        source: S,
        sink: K,
        config: RenderConfig<'a>,
        interval: Duration,
    ) -> Self {
        Self { source, sink, config, interval, state: RenderState::new() }
    }

    pub const fn state(&self) -> RenderState { self.state }

    /// One fetch and render cycle. State only advances on success.
    pub fn poll_once(&mut self) -> Result<Cycle, PollError<K::Error>> {
        let calendar = self.source.fetch()?;
        let (state, cycle) =
            run_cycle(&mut self.sink, &calendar, &self.config, self.state).map_err(PollError::Render)?;
        self.state = state;
        Ok(cycle)
    }

    /// Poll until `stop` is raised.
    pub fn run(
        &mut self,
        stop: &AtomicBool,
    ) {
        info!("polling every {}s", self.interval.as_secs());
        while !stop.load(Ordering::Relaxed) {
            match self.poll_once() {
                Ok(Cycle::Rendered(report)) => {
                    debug!("{} columns, {} cells, {} skipped", report.columns, report.cells_drawn, report.cells_skipped);
                },
                Ok(Cycle::Unchanged) => {},
                Err(e) => error!("{e}, retrying next poll"),
            }
            self.wait(stop);
        }
        info!("stop requested");
    }

    /// Hand the sink back for cleanup.
    pub fn into_sink(self) -> K { self.sink }

    fn wait(
        &self,
        stop: &AtomicBool,
    ) {
        // An interval past the end of the clock just waits for the stop flag
        let deadline = Instant::now().checked_add(self.interval);
        while !stop.load(Ordering::Relaxed) {
            let remaining = deadline.map_or(STOP_CHECK_INTERVAL, |d| d.saturating_duration_since(Instant::now()));
            if remaining.is_zero() {
                return;
            }
            thread::sleep(remaining.min(STOP_CHECK_INTERVAL));
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
