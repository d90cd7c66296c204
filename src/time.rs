//! Time abstraction traits for platform-agnostic timing.
//!
//! Every threshold in this crate is measured as `now.duration_since(earlier)`,
//! so instant types backed by a wrapping counter must implement
//! [`TimeInstant::duration_since`] with wrapping subtraction.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Millisecond duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u32);

impl TimeDuration for MillisDuration {
    fn as_millis(&self) -> u64 {
        u64::from(self.0)
    }
}

/// Millisecond counter instant that wraps after `u32::MAX`.
///
/// Matches the free-running millisecond tick found on most microcontrollers
/// (it wraps after ~49.7 days). Durations across the wrap point stay correct
/// as long as the real elapsed time is below the counter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl TimeInstant for Millis {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0.wrapping_sub(earlier.0))
    }
}

/// Returns true when strictly more than `threshold_ms` elapsed since `earlier`.
#[inline]
pub(crate) fn elapsed_exceeds<I: TimeInstant>(now: I, earlier: I, threshold_ms: u32) -> bool {
    now.duration_since(earlier).as_millis() > u64::from(threshold_ms)
}
