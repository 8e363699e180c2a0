//! Display geometry, layout constants and the per-render configuration.
//!
//! # Pre-computed Layout Constants
//!
//! Header and grid positions are fixed `const` values. Only the grid stride
//! depends on [`RenderConfig`], so it is the one value computed per render.
//!
//! ```text
//!  (4,2) title                      summary "<total> contrib / <days>d"
//!  ──────────────────────────────────────────────────────────── y = 20
//!  (6,26) ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■  Sun
//!         ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■ ■  Mon
//!         ...                                   ...
//! ```

use embedded_graphics::prelude::Point;

use crate::thresholds::Thresholds;

// =============================================================================
// Display Configuration
// =============================================================================

/// Panel width in pixels (Waveshare 2.13" V4, landscape).
pub const SCREEN_WIDTH: u32 = 250;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 122;

/// Bytes needed for one packed row of `width` pixels.
#[inline]
pub const fn row_bytes(width: u32) -> usize { (width as usize).div_ceil(8) }

/// Backing store size for a [`Bitmap`](crate::bitmap::Bitmap).
///
/// Large enough for the panel in either orientation (landscape needs
/// 32 × 122 bytes, portrait 16 × 250).
pub const FRAMEBUFFER_CAPACITY: usize = {
    let landscape = row_bytes(SCREEN_WIDTH) * SCREEN_HEIGHT as usize;
    let portrait = row_bytes(SCREEN_HEIGHT) * SCREEN_WIDTH as usize;
    if landscape > portrait { landscape } else { portrait }
};

// =============================================================================
// Calendar Shape
// =============================================================================

/// Rows in the grid, one per weekday (0 = Sunday .. 6 = Saturday).
pub const DAYS_PER_WEEK: usize = 7;

// =============================================================================
// Header Layout
// =============================================================================

/// Horizontal margin for header text and the separator ends.
pub const HEADER_MARGIN: i32 = 4;

/// Top-left corner of the subject label.
pub const TITLE_POS: Point = Point::new(HEADER_MARGIN, 2);

/// Top edge of the right-aligned summary text.
pub const SUMMARY_TOP: i32 = 4;

/// Y coordinate of the rule under the header band.
pub const SEPARATOR_Y: i32 = 20;

// =============================================================================
// Grid Layout
// =============================================================================

/// Left edge of the first (oldest) column.
pub const GRID_LEFT: i32 = 6;

/// Top edge of the Sunday row.
pub const GRID_TOP: i32 = 26;

/// Space between the newest column and the weekday labels.
pub const AXIS_LABEL_GAP: i32 = 4;

// =============================================================================
// Render Defaults
// =============================================================================

/// Query window in days. Informational for the header summary.
pub const DEFAULT_WINDOW_DAYS: u32 = 126;

/// Trailing weeks drawn. 18 columns of 12 px plus labels fill the 250 px width.
pub const DEFAULT_VISIBLE_WEEKS: usize = 18;

/// Cell side in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 10;

/// Gap between neighbouring cells in pixels.
pub const DEFAULT_GAP: u32 = 2;

const _: () = assert!(DEFAULT_CELL_SIZE >= 3, "default cells must have a stipple interior");
const _: () = assert!(
    GRID_TOP + (DAYS_PER_WEEK as i32) * (DEFAULT_CELL_SIZE + DEFAULT_GAP) as i32 <= SCREEN_HEIGHT as i32,
    "default grid must fit below the header"
);

// =============================================================================
// Render Configuration
// =============================================================================

/// Everything the layout engine needs besides the calendar itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig<'a> {
    /// Left-aligned header title, usually the account name.
    pub subject_label: &'a str,
    /// Days covered by the query, shown in the summary text.
    pub window_days: u32,
    /// Maximum number of trailing weeks to draw. Clamped to what the calendar holds.
    pub visible_weeks: usize,
    /// Cell side in pixels. Sizes below 3 render outlines only.
    pub cell_size: u32,
    /// Pixels between cells.
    pub gap: u32,
    /// Count breakpoints for intensity levels.
    pub thresholds: Thresholds,
}

impl<'a> RenderConfig<'a> {
    /// Configuration with the default window, grid and thresholds.
    pub const fn new(subject_label: &'a str) -> Self {
        Self {
            subject_label,
            window_days: DEFAULT_WINDOW_DAYS,
            visible_weeks: DEFAULT_VISIBLE_WEEKS,
            cell_size: DEFAULT_CELL_SIZE,
            gap: DEFAULT_GAP,
            thresholds: Thresholds::DEFAULT,
        }
    }

    /// Distance between the origins of neighbouring cells.
    #[inline]
    pub const fn stride(&self) -> u32 { self.cell_size.saturating_add(self.gap) }
}

// =============================================================================
// Unit Tests
// =============================================================================
