//! Single heatmap cell shading.
//!
//! The panel cannot show gray, so intermediate levels are stippled with a
//! fixed dot pattern per level instead.
//!
//! ```text
//! level 0   level 1   level 2   level 3   level 4     (6 px cells)
//! ######    ######    ######    ######    ######
//! #....#    #.#..#    #.#.##    ##.#.#    ######
//! #....#    ##..##    ##.#.#    #.#.##    ######
//! #....#    #..#.#    #.#.##    ##.#.#    ######
//! #....#    #.#..#    ##.#.#    #.#.##    ######
//! ######    ######    ######    ######    ######
//! ```
//!
//! Pattern phase is taken from the cell origin, so every cell at a given level
//! looks the same wherever it sits in the grid.

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PointsIter, Rectangle},
};

use crate::{
    colors::INK,
    styles::{CELL_FILL_STYLE, CELL_OUTLINE_STYLE},
    thresholds::Intensity,
};

/// Periodic dot pattern: a pixel at offset `(dx, dy)` is inked when
/// `(dx + dy + offset) % step == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stipple {
    pub step: i32,
    pub offset: i32,
}

impl Stipple {
    #[inline]
    pub const fn is_ink(
        &self,
        dx: i32,
        dy: i32,
    ) -> bool {
        (dx + dy + self.offset).rem_euclid(self.step) == 0
    }
}

/// Pattern for the dithered levels. `None` for empty and solid cells.
pub const fn stipple_for(level: Intensity) -> Option<Stipple> {
    match level {
        Intensity::Low => Some(Stipple { step: 3, offset: 0 }),
        Intensity::Medium => Some(Stipple { step: 2, offset: 1 }),
        Intensity::High => Some(Stipple { step: 2, offset: 0 }),
        Intensity::Empty | Intensity::Full => None,
    }
}

/// Draw one `size`×`size` cell anchored at `origin`.
///
/// Cells smaller than 3 px have no interior and are drawn as outline only,
/// whatever the level. A zero size draws nothing.
pub fn shade_cell<D>(
    display: &mut D,
    origin: Point,
    size: u32,
    level: Intensity,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if size == 0 {
        return Ok(());
    }

    Rectangle::new(origin, Size::new(size, size))
        .into_styled(CELL_OUTLINE_STYLE)
        .draw(display)?;

    let inner = size.saturating_sub(2);
    if inner == 0 {
        return Ok(());
    }
    let interior = Rectangle::new(origin + Point::new(1, 1), Size::new(inner, inner));

    if level == Intensity::Full {
        return interior.into_styled(CELL_FILL_STYLE).draw(display);
    }

    let Some(pattern) = stipple_for(level) else {
        return Ok(());
    };
    display.draw_iter(
        interior
            .points()
            .filter(|p| {
                let d = *p - origin;
                pattern.is_ink(d.x, d.y)
            })
            .map(|p| Pixel(p, INK)),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;

    const CELL: u32 = 10;

    fn frame() -> Bitmap { Bitmap::new(Size::new(40, 40)).unwrap() }

    fn shaded(
        origin: Point,
        size: u32,
        level: Intensity,
    ) -> Bitmap {
        let mut frame = frame();
        shade_cell(&mut frame, origin, size, level).unwrap();
        frame
    }

    fn interior_ink(
        frame: &Bitmap,
        origin: Point,
        size: u32,
    ) -> usize {
        let inner = size as i32 - 2;
        let mut n = 0;
        for dy in 1..=inner {
            for dx in 1..=inner {
                if frame.is_ink(origin.x + dx, origin.y + dy) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_outline_drawn_for_every_level() {
        let origin = Point::new(5, 5);
        for level in Intensity::ALL {
            let frame = shaded(origin, CELL, level);
            for i in 0..CELL as i32 {
                assert!(frame.is_ink(5 + i, 5), "{level:?}: top edge at {i}");
                assert!(frame.is_ink(5 + i, 14), "{level:?}: bottom edge at {i}");
                assert!(frame.is_ink(5, 5 + i), "{level:?}: left edge at {i}");
                assert!(frame.is_ink(14, 5 + i), "{level:?}: right edge at {i}");
            }
            // Nothing outside the square
            assert!(!frame.is_ink(4, 5));
            assert!(!frame.is_ink(15, 14));
        }
    }

    #[test]
    fn test_empty_interior_is_paper() {
        let origin = Point::new(5, 5);
        let frame = shaded(origin, CELL, Intensity::Empty);
        assert_eq!(interior_ink(&frame, origin, CELL), 0);
    }

    #[test]
    fn test_full_interior_is_ink() {
        let origin = Point::new(5, 5);
        let frame = shaded(origin, CELL, Intensity::Full);
        assert_eq!(interior_ink(&frame, origin, CELL), 64);
    }

    #[test]
    fn test_stipple_density_increases_with_level() {
        let origin = Point::new(5, 5);
        let low = interior_ink(&shaded(origin, CELL, Intensity::Low), origin, CELL);
        let medium = interior_ink(&shaded(origin, CELL, Intensity::Medium), origin, CELL);
        let high = interior_ink(&shaded(origin, CELL, Intensity::High), origin, CELL);
        assert!(0 < low && low < medium, "low={low} medium={medium}");
        // Both checkerboards cover half the interior, offset by one pixel
        assert_eq!(medium, 32);
        assert_eq!(high, 32);
        assert!(high < 64);
    }

    #[test]
    fn test_stipple_pattern_matches_formula() {
        let origin = Point::new(3, 7);
        for level in [Intensity::Low, Intensity::Medium, Intensity::High] {
            let pattern = stipple_for(level).unwrap();
            let frame = shaded(origin, CELL, level);
            for dy in 1..9 {
                for dx in 1..9 {
                    let expected = (dx + dy + pattern.offset) % pattern.step == 0;
                    assert_eq!(
                        frame.is_ink(origin.x + dx, origin.y + dy),
                        expected,
                        "{level:?} at ({dx},{dy})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_stipple_is_deterministic() {
        for level in [Intensity::Low, Intensity::Medium, Intensity::High] {
            let a = shaded(Point::new(4, 9), CELL, level);
            let b = shaded(Point::new(4, 9), CELL, level);
            assert_eq!(a, b, "{level:?} not deterministic");
        }
    }

    #[test]
    fn test_pattern_independent_of_position() {
        let a = shaded(Point::new(0, 0), CELL, Intensity::Low);
        let b = shaded(Point::new(7, 11), CELL, Intensity::Low);
        for dy in 0..CELL as i32 {
            for dx in 0..CELL as i32 {
                assert_eq!(a.is_ink(dx, dy), b.is_ink(7 + dx, 11 + dy), "offset ({dx},{dy})");
            }
        }
    }

    #[test]
    fn test_small_cells_degrade_to_outline() {
        for size in [1, 2] {
            let frame = shaded(Point::new(2, 2), size, Intensity::Full);
            assert_eq!(frame.ink_count(), (size * size) as usize, "size {size}");
        }
        // Size 3 has a single interior pixel
        let frame = shaded(Point::new(2, 2), 3, Intensity::Empty);
        assert!(!frame.is_ink(3, 3));
        let frame = shaded(Point::new(2, 2), 3, Intensity::Full);
        assert!(frame.is_ink(3, 3));
    }

    #[test]
    fn test_zero_size_draws_nothing() {
        let frame = shaded(Point::new(2, 2), 0, Intensity::Full);
        assert_eq!(frame.ink_count(), 0);
    }

    #[test]
    fn test_cell_overwrites_previous_content() {
        let origin = Point::new(5, 5);
        let mut frame = shaded(origin, CELL, Intensity::Full);
        shade_cell(&mut frame, origin, CELL, Intensity::Empty).unwrap();
        assert_eq!(interior_ink(&frame, origin, CELL), 0);
    }
}
