//! Header band: subject label, contribution summary and separator rule.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Line,
    text::{Baseline, Text, renderer::TextRenderer},
};
use heapless::String;

use crate::{
    config::{HEADER_MARGIN, SEPARATOR_Y, SUMMARY_TOP, TITLE_POS},
    styles::{RULE_STYLE, SUMMARY_STYLE, TITLE_STYLE, TOP_LEFT},
};

/// Fits `"4294967295 contrib / 4294967295d"`.
pub const SUMMARY_LEN: usize = 32;

/// Format the right-hand summary, e.g. `"21 contrib / 126d"`.
pub fn summary_text(
    total: u32,
    window_days: u32,
) -> String<SUMMARY_LEN> {
    let mut s: String<SUMMARY_LEN> = String::new();
    let _ = write!(s, "{total} contrib / {window_days}d");
    s
}

/// Draw the header and return the summary text that was placed.
///
/// The summary is right-justified by measuring it with the font it is drawn
/// with, then anchoring it `HEADER_MARGIN` px from the right edge.
pub fn draw_header<D>(
    display: &mut D,
    subject_label: &str,
    total: u32,
    window_days: u32,
) -> Result<String<SUMMARY_LEN>, D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let width = display.bounding_box().size.width as i32;

    Text::with_text_style(subject_label, TITLE_POS, TITLE_STYLE, TOP_LEFT).draw(display)?;

    let summary = summary_text(total, window_days);
    let metrics = SUMMARY_STYLE.measure_string(&summary, Point::zero(), Baseline::Top);
    let summary_x = width - metrics.bounding_box.size.width as i32 - HEADER_MARGIN;
    Text::with_text_style(&summary, Point::new(summary_x, SUMMARY_TOP), SUMMARY_STYLE, TOP_LEFT).draw(display)?;

    Line::new(
        Point::new(HEADER_MARGIN, SEPARATOR_Y),
        Point::new(width - HEADER_MARGIN, SEPARATOR_Y),
    )
    .into_styled(RULE_STYLE)
    .draw(display)?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bitmap::Bitmap,
        config::{SCREEN_HEIGHT, SCREEN_WIDTH},
    };

    fn panel() -> Bitmap { Bitmap::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)).unwrap() }

    #[test]
    fn test_summary_text() {
        assert_eq!(summary_text(21, 126).as_str(), "21 contrib / 126d");
        assert_eq!(summary_text(0, 7).as_str(), "0 contrib / 7d");
    }

    #[test]
    fn test_summary_text_fits_extremes() {
        let s = summary_text(u32::MAX, u32::MAX);
        assert_eq!(s.as_str(), "4294967295 contrib / 4294967295d");
    }

    #[test]
    fn test_header_draws_rule() {
        let mut frame = panel();
        let summary = draw_header(&mut frame, "alice", 21, 126).unwrap();
        assert_eq!(summary.as_str(), "21 contrib / 126d");
        assert!(frame.is_ink(HEADER_MARGIN, SEPARATOR_Y));
        assert!(frame.is_ink(125, SEPARATOR_Y));
        assert!(frame.is_ink(SCREEN_WIDTH as i32 - HEADER_MARGIN, SEPARATOR_Y));
        assert!(!frame.is_ink(HEADER_MARGIN - 1, SEPARATOR_Y));
    }

    #[test]
    fn test_header_stays_above_rule() {
        let mut frame = panel();
        draw_header(&mut frame, "alice", 21, 126).unwrap();
        for y in SEPARATOR_Y + 1..SCREEN_HEIGHT as i32 {
            for x in 0..SCREEN_WIDTH as i32 {
                assert!(!frame.is_ink(x, y), "header ink below rule at ({x},{y})");
            }
        }
    }

    #[test]
    fn test_summary_is_right_justified() {
        let mut frame = panel();
        draw_header(&mut frame, "", 21, 126).unwrap();

        // Rightmost inked column above the rule belongs to the summary's last glyph
        let rightmost = (0..SCREEN_WIDTH as i32)
            .rev()
            .find(|&x| (0..SEPARATOR_Y).any(|y| frame.is_ink(x, y)))
            .unwrap();
        let limit = SCREEN_WIDTH as i32 - HEADER_MARGIN;
        assert!(rightmost < limit, "summary overruns margin: {rightmost}");
        assert!(rightmost > limit - 10, "summary not right-justified: {rightmost}");
    }
}
