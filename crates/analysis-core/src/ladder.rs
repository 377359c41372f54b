/// Threshold ladders for categorical labeling.
///
/// A ladder is an ordered list of `(lower_bound_exclusive, label)` rungs evaluated
/// top-down: the first rung whose bound the value strictly exceeds wins, and values
/// that clear no rung fall through to the floor label. A value sitting exactly on a
/// bound therefore lands in the bucket below it.
///
/// Each classification (regime, valuation, display tier) owns its own ladder so the
/// different cut points never get mixed up.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdLadder<T: 'static> {
    rungs: &'static [(f64, T)],
    floor: T,
}

impl<T: Copy + 'static> ThresholdLadder<T> {
    /// Rungs must be listed from the highest bound to the lowest.
    pub const fn new(rungs: &'static [(f64, T)], floor: T) -> Self {
        Self { rungs, floor }
    }

    pub fn classify(&self, value: f64) -> T {
        self.rungs
            .iter()
            .find(|(bound, _)| value > *bound)
            .map(|(_, label)| *label)
            .unwrap_or(self.floor)
    }

    pub fn rungs(&self) -> &'static [(f64, T)] {
        self.rungs
    }

    pub fn floor(&self) -> T {
        self.floor
    }
}

/// Saturate `value` into `[min, max]`, i.e. `max(min, min(max, value))`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}
