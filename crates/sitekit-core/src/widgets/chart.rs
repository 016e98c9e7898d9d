//! Staggered reveal of the hero chart bars.

use std::time::Duration;

/// Delay before the first bar grows.
pub const CHART_INITIAL_DELAY: Duration = Duration::from_millis(500);

/// Additional delay per bar.
pub const CHART_STAGGER: Duration = Duration::from_millis(100);

/// When each of `bars` bars should grow to full height, from page load.
#[must_use]
pub fn chart_reveal_schedule(bars: usize) -> Vec<Duration> {
    (0..bars)
        .map(|i| CHART_INITIAL_DELAY + CHART_STAGGER * u32::try_from(i).unwrap_or(u32::MAX))
        .collect()
}
