use crate::foundation::error::{LumaError, LumaResult};

/// A point on the show's monotonic clock.
///
/// Scene time is strictly non-decreasing across calls within one running
/// session. It drives effect animation and measures cue elapsed time in the
/// sequencer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimePoint {
    /// Frame counter, starting at 0.
    pub frame: u64,
    /// Scene time in milliseconds.
    pub scene_time_millis: i64,
}

impl TimePoint {
    pub fn new(frame: u64, scene_time_millis: i64) -> Self {
        Self {
            frame,
            scene_time_millis,
        }
    }

    /// Time point of `frame` on a fixed-rate clock starting at `start_millis`.
    pub fn at_frame(frame: u64, fps: u32, start_millis: i64) -> LumaResult<Self> {
        if fps == 0 {
            return Err(LumaError::config("fps must be > 0"));
        }
        let offset = (frame as f64) * 1000.0 / f64::from(fps);
        Ok(Self {
            frame,
            scene_time_millis: start_millis.saturating_add(offset.floor() as i64),
        })
    }

    pub fn scene_time_millis(self) -> i64 {
        self.scene_time_millis
    }
}

/// Position of a device in show space. Unused dimensions are 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
