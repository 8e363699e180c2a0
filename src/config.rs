//! Host configuration: compile-time defaults and command-line overrides.
//!
//! Defaults reproduce the classic setup for a 2.13" panel: the last 126 days
//! of one account, 18 week-columns of 10 px cells, re-checked every 6 hours.
//! Every value can be overridden on the command line; the access token is
//! only ever read from the environment.

use std::{
    path::PathBuf,
    time::Duration,
};

use clap::Parser;
use etch_common::{
    RenderConfig, Thresholds,
    config::{DEFAULT_CELL_SIZE, DEFAULT_GAP, DEFAULT_VISIBLE_WEEKS, DEFAULT_WINDOW_DAYS},
};

// =============================================================================
// Source Configuration
// =============================================================================

/// Account rendered when `--login` is not given.
pub const DEFAULT_LOGIN: &str = "torvalds";

/// GitHub GraphQL endpoint.
pub const GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Media type GitHub recommends for API requests.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Whole-request timeout for the calendar query.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

// =============================================================================
// Timing Configuration
// =============================================================================

/// Hours between calendar checks. The panel only redraws if the total changed.
pub const DEFAULT_REFRESH_HOURS: u64 = 6;

/// Longest accepted `--refresh-hours`: one year.
pub const MAX_REFRESH_HOURS: u64 = 24 * 365;

/// Longest stretch the poll loop sleeps before re-checking the stop flag.
pub const STOP_CHECK_INTERVAL: Duration = Duration::from_millis(250);

// =============================================================================
// Output Configuration
// =============================================================================

/// Where the PNG sink writes frames by default.
pub const DEFAULT_OUTPUT: &str = "contrib-etch.png";

/// Pixel scale of the written PNG.
pub const OUTPUT_SCALE: u32 = 2;

// =============================================================================
// Command Line
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "contrib-etch")]
#[command(about = "Render a GitHub contribution heatmap for a 1-bit e-paper panel")]
#[command(version)]
pub struct Cli {
    /// GitHub login whose calendar is drawn
    #[arg(long, default_value = DEFAULT_LOGIN)]
    pub login: String,

    /// Days of history to query (shown in the header)
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS, value_parser = clap::value_parser!(u32).range(1..=366))]
    pub days: u32,

    /// Trailing week-columns to draw
    #[arg(long, default_value_t = DEFAULT_VISIBLE_WEEKS)]
    pub weeks: usize,

    /// Cell size in pixels (below 3 draws outlines only)
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE, value_parser = clap::value_parser!(u32).range(1..=32))]
    pub cell: u32,

    /// Gap between cells in pixels
    #[arg(long, default_value_t = DEFAULT_GAP, value_parser = clap::value_parser!(u32).range(0..=16))]
    pub gap: u32,

    /// Hours between calendar checks
    #[arg(long, default_value_t = DEFAULT_REFRESH_HOURS, value_parser = clap::value_parser!(u64).range(1..=MAX_REFRESH_HOURS))]
    pub refresh_hours: u64,

    /// Read the calendar from a JSON file instead of querying GitHub
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// PNG file the rendered frame is written to
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Render settings borrowing the subject label from the parsed arguments.
    pub fn render_config(&self) -> RenderConfig<'_> {
        RenderConfig {
            subject_label: &self.login,
            window_days: self.days,
            visible_weeks: self.weeks,
            cell_size: self.cell,
            gap: self.gap,
            thresholds: Thresholds::DEFAULT,
        }
    }

    pub fn refresh_interval(&self) -> Duration { Duration::from_secs(self.refresh_hours.saturating_mul(3600)) }
}

// =============================================================================
// Unit Tests
// =============================================================================
