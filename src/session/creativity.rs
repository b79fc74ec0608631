//! The creativity dial: a bounded sampling-temperature-like control.
//!
//! The UI shows the dial as a percentage of its range; internally it is a
//! value in [0, 2] stepped in 0.2 increments. Values are rounded to one
//! decimal place after each step so repeated stepping cannot accumulate
//! floating-point drift.

pub const CREATIVITY_DEFAULT: f64 = 1.0;

const STEP: f64 = 0.2;
const MIN: f64 = 0.0;
const MAX: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreativityDial {
    value: f64,
}

impl CreativityDial {
    pub fn new() -> Self {
        Self {
            value: CREATIVITY_DEFAULT,
        }
    }

    /// Current internal value, in [0, 2].
    pub fn value(self) -> f64 {
        self.value
    }

    /// User-facing percentage: `round((t / 2) * 100)`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(self) -> u8 {
        ((self.value / MAX) * 100.0).round() as u8
    }

    /// Step up by 0.2, clamped at 2.0. Returns whether the value changed;
    /// stepping from the upper bound is a no-op.
    pub fn step_up(&mut self) -> bool {
        self.set(round1((self.value + STEP).min(MAX)))
    }

    /// Step down by 0.2, clamped at 0.0. Returns whether the value changed;
    /// stepping from the lower bound is a no-op.
    pub fn step_down(&mut self) -> bool {
        self.set(round1((self.value - STEP).max(MIN)))
    }

    /// Back to the default. Called on every fresh generation.
    pub fn reset(&mut self) {
        self.value = CREATIVITY_DEFAULT;
    }

    fn set(&mut self, next: f64) -> bool {
        let changed = (next - self.value).abs() > f64::EPSILON;
        self.value = next;
        changed
    }
}

impl Default for CreativityDial {
    fn default() -> Self {
        Self::new()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
