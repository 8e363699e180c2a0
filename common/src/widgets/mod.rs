//! Drawing components for the heatmap.
//!
//! All widgets are generic over `DrawTarget<Color = BinaryColor>` so they run
//! against the in-memory [`Bitmap`](crate::bitmap::Bitmap) as well as any
//! panel driver that exposes a monochrome draw target.

mod cell;
mod grid;
mod header;

pub use cell::{Stipple, shade_cell, stipple_for};
pub use grid::{GridGeometry, GridReport, LABELED_ROWS, WEEKDAY_NAMES, draw_axis_labels, render_calendar};
pub use header::{SUMMARY_LEN, draw_header, summary_text};
