use crate::foundation::core::TimePoint;

/// Linearly interpolated signal that oscillates between `start` and `end`,
/// with sharp corners at both values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriangleSignal {
    pub start: f32,
    pub end: f32,
    pub period_millis: u64,
}

impl TriangleSignal {
    pub fn new(start: f32, end: f32, period_millis: u64) -> Self {
        Self {
            start,
            end,
            period_millis,
        }
    }

    /// Value at phase `x` in `[0, 1]`: start→end over the first half, back to
    /// start over the second.
    pub fn interpolate(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        let (x, x0, x1) = if x <= 0.5 {
            (x, self.start, self.end)
        } else {
            (x - 0.5, self.end, self.start)
        };
        let x = x * 2.0;
        x0 + (x1 - x0) * x
    }

    pub fn value_at(&self, time: TimePoint) -> f32 {
        if self.period_millis == 0 {
            return self.start;
        }
        let period = self.period_millis as i64;
        let phase = time.scene_time_millis().rem_euclid(period);
        self.interpolate(phase as f32 / period as f32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/signal.rs"]
mod tests;
