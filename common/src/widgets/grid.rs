//! Grid layout engine: places one cell per day and labels the weekday rows.
//!
//! Columns run oldest (left) to newest (right); rows are weekdays with Sunday
//! on top. Only the trailing `visible_weeks` weeks are drawn, clamped to what
//! the snapshot holds.
//!
//! Days whose weekday is outside 0..=6 are skipped and counted in the
//! [`GridReport`] rather than failing the render.

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    text::Text,
};
use heapless::String;
use log::{debug, warn};

use crate::{
    calendar::CalendarSnapshot,
    config::{AXIS_LABEL_GAP, DAYS_PER_WEEK, GRID_LEFT, GRID_TOP, RenderConfig},
    styles::{AXIS_STYLE, MIDDLE_LEFT},
    widgets::{cell::shade_cell, header::{SUMMARY_LEN, draw_header}},
};

/// Short weekday names, indexed by row.
pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Rows that get a label. Every other row, so 9pt text never collides on a 12 px stride.
pub const LABELED_ROWS: [usize; 3] = [1, 3, 5];

// =============================================================================
// Grid Geometry
// =============================================================================

/// Pixel positions for a grid with a given cell size and gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    origin: Point,
    stride: i32,
    cell_size: u32,
}

impl GridGeometry {
    pub fn new(config: &RenderConfig<'_>) -> Self {
        Self {
            origin: Point::new(GRID_LEFT, GRID_TOP),
            stride: i32::try_from(config.stride()).unwrap_or(i32::MAX),
            cell_size: config.cell_size,
        }
    }

    /// Top-left corner of the cell at `column`, `row`. Rows come from [`DayRecord::row`].
    ///
    /// [`DayRecord::row`]: crate::calendar::DayRecord::row
    pub fn cell_origin(
        &self,
        column: usize,
        row: usize,
    ) -> Point {
        Point::new(
            self.origin.x.saturating_add(self.offset(column)),
            self.origin.y.saturating_add(self.offset(row)),
        )
    }

    /// Left edge of the weekday labels for a grid of `columns` columns.
    pub fn label_x(
        &self,
        columns: usize,
    ) -> i32 {
        self.origin
            .x
            .saturating_add(self.offset(columns))
            .saturating_add(AXIS_LABEL_GAP)
    }

    /// Vertical centre of a weekday row.
    pub fn row_center_y(
        &self,
        row: usize,
    ) -> i32 {
        let half_cell = (self.cell_size / 2) as i32;
        self.origin.y.saturating_add(self.offset(row)).saturating_add(half_cell)
    }

    fn offset(
        &self,
        index: usize,
    ) -> i32 {
        i32::try_from(index).unwrap_or(i32::MAX).saturating_mul(self.stride)
    }
}

// =============================================================================
// Render Report
// =============================================================================

/// What a layout pass actually placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridReport {
    /// Week columns drawn.
    pub columns: usize,
    /// Day cells shaded.
    pub cells_drawn: usize,
    /// Days dropped for an out-of-range weekday.
    pub cells_skipped: usize,
    /// Header summary text as drawn.
    pub summary: String<SUMMARY_LEN>,
}

// =============================================================================
// Layout
// =============================================================================

/// Lay out the header, heatmap and axis labels onto `display`.
///
/// The target is expected to be freshly cleared; cells paint their own paper
/// interiors but nothing else is erased.
pub fn render_calendar<D>(
    display: &mut D,
    calendar: &CalendarSnapshot,
    config: &RenderConfig<'_>,
) -> Result<GridReport, D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let weeks = calendar.trailing_weeks(config.visible_weeks);
    if weeks.len() < config.visible_weeks {
        debug!("only {} of {} requested weeks available", weeks.len(), config.visible_weeks);
    }

    let summary = draw_header(
        display,
        config.subject_label,
        calendar.total_contributions(),
        config.window_days,
    )?;

    let grid = GridGeometry::new(config);
    let mut cells_drawn = 0;
    let mut cells_skipped = 0;

    for (column, week) in weeks.iter().enumerate() {
        for day in week.days() {
            let Some(row) = day.row() else {
                warn!("skipping {}: weekday {} out of range", day.date, day.weekday);
                cells_skipped += 1;
                continue;
            };
            let level = config.thresholds.classify(day.count);
            shade_cell(display, grid.cell_origin(column, row), config.cell_size, level)?;
            cells_drawn += 1;
        }
    }

    draw_axis_labels(display, &grid, weeks.len())?;

    debug!("laid out {} columns, {cells_drawn} cells, {cells_skipped} skipped", weeks.len());
    Ok(GridReport { columns: weeks.len(), cells_drawn, cells_skipped, summary })
}

/// Weekday names to the right of the newest column, centred on their rows.
pub fn draw_axis_labels<D>(
    display: &mut D,
    grid: &GridGeometry,
    columns: usize,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let x = grid.label_x(columns);
    for row in LABELED_ROWS {
        let position = Point::new(x, grid.row_center_y(row));
        Text::with_text_style(WEEKDAY_NAMES[row], position, AXIS_STYLE, MIDDLE_LEFT).draw(display)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
