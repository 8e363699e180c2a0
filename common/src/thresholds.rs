//! Contribution count thresholds and intensity classification.
//!
//! Breakpoints are tuned for short windows (a few months) so that the grid
//! keeps contrast even for modest activity. They are a fixed policy, not
//! derived from the data being drawn.
//!
//! | Count   | Level | Shading            |
//! |---------|-------|--------------------|
//! | 0       | 0     | outline only       |
//! | 1       | 1     | sparse stipple     |
//! | 2..=3   | 2     | checker stipple    |
//! | 4..=7   | 3     | dense stipple      |
//! | 8..     | 4     | solid              |
//!
//! # Compile-Time Validation
//!
//! The default breakpoints carry `const` assertions on their ordering, the
//! same way every other threshold group in this crate does.

// =============================================================================
// Default Breakpoints
// =============================================================================

/// Highest count shown at level 1.
pub const LEVEL1_MAX: u32 = 1;

/// Highest count shown at level 2.
pub const LEVEL2_MAX: u32 = 3;

/// Highest count shown at level 3. Anything above is level 4.
pub const LEVEL3_MAX: u32 = 7;

// Compile-time validation: breakpoints must be strictly ascending and above zero
const _: () = assert!(0 < LEVEL1_MAX);
const _: () = assert!(LEVEL1_MAX < LEVEL2_MAX);
const _: () = assert!(LEVEL2_MAX < LEVEL3_MAX);

// =============================================================================
// Intensity Level
// =============================================================================

/// Quantized activity for one day. Ordered from empty to full.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intensity {
    /// No activity.
    #[default]
    Empty = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    /// At or above the busiest breakpoint.
    Full = 4,
}

impl Intensity {
    /// All levels in ascending order.
    pub const ALL: [Self; 5] = [Self::Empty, Self::Low, Self::Medium, Self::High, Self::Full];

    /// Ordinal 0..=4.
    #[inline]
    pub const fn level(self) -> u8 { self as u8 }
}

// =============================================================================
// Threshold Set
// =============================================================================

/// Count breakpoints for levels 1 through 3.
///
/// A count of zero is always [`Intensity::Empty`]; counts above `level3_max`
/// are always [`Intensity::Full`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    pub level1_max: u32,
    pub level2_max: u32,
    pub level3_max: u32,
}

impl Thresholds {
    /// The breakpoints the rendered output is expected to match.
    pub const DEFAULT: Self = Self { level1_max: LEVEL1_MAX, level2_max: LEVEL2_MAX, level3_max: LEVEL3_MAX };

    /// Map a count onto a level using these breakpoints.
    ///
    /// Total over `u32`: no arithmetic is performed, so large counts cannot overflow.
    pub const fn classify(
        &self,
        count: u32,
    ) -> Intensity {
        if count == 0 {
            Intensity::Empty
        } else if count <= self.level1_max {
            Intensity::Low
        } else if count <= self.level2_max {
            Intensity::Medium
        } else if count <= self.level3_max {
            Intensity::High
        } else {
            Intensity::Full
        }
    }

    /// Whether the breakpoints ascend. Unordered sets still classify, but
    /// some levels become unreachable.
    pub const fn is_ordered(&self) -> bool {
        0 < self.level1_max && self.level1_max < self.level2_max && self.level2_max < self.level3_max
    }
}

impl Default for Thresholds {
    fn default() -> Self { Self::DEFAULT }
}

/// Classify a day's count with the default breakpoints.
#[inline]
pub const fn classify(count: u32) -> Intensity { Thresholds::DEFAULT.classify(count) }

// =============================================================================
// Unit Tests
// =============================================================================
