//! Contribution heatmap host.
//!
//! Fetches a GitHub contribution calendar (or reads one from disk), renders it
//! with `etch-common` and writes each new frame to a PNG standing in for the
//! e-paper panel. Runs until Ctrl+C unless `--once` is given.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod config;
mod poller;
mod sink;
mod source;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result};
use clap::Parser;
use embedded_graphics::prelude::Size;
use etch_common::{
    DisplaySink,
    config::{SCREEN_HEIGHT, SCREEN_WIDTH},
};
use log::{info, warn};

use crate::{
    config::{Cli, TOKEN_ENV},
    poller::Poller,
    sink::PngSink,
    source::{CalendarSource, FileSource, GithubSource},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let source: Box<dyn CalendarSource> = match &cli.input {
        Some(path) => {
            info!("reading calendar from {}", path.display());
            Box::new(FileSource::new(path))
        },
        None => {
            let token = std::env::var(TOKEN_ENV).ok();
            Box::new(GithubSource::new(&cli.login, cli.days, token).context("cannot query GitHub")?)
        },
    };

    let mut sink = PngSink::new(&cli.output, Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    sink.init().context("failed to initialize display")?;
    info!("writing frames to {}", sink.path().display());

    let mut poller = Poller::new(source, sink, cli.render_config(), cli.refresh_interval());

    let outcome = if cli.once {
        poller.poll_once().map(drop).context("render cycle failed")
    } else {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)).context("failed to set Ctrl+C handler")?;
        poller.run(&stop);
        Ok(())
    };

    if let Some(total) = poller.state().last_rendered() {
        info!("panel shows {total} contributions");
    }
    let mut sink = poller.into_sink();
    if let Err(e) = sink.cleanup() {
        warn!("display cleanup failed: {e}");
    }
    outcome
}
