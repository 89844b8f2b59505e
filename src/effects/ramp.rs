use crate::{
    animation::interpolator::{Interpolation, Interpolator},
    effects::effect::{
        Animate, Cue, Effect, PatchDevices, RemoteState, Render, StateClass, Stateful,
        resize_buffer, wrong_class,
    },
    foundation::{core::TimePoint, error::LumaResult, pixel::Pixel},
    patch::device::Device,
};

/// Remote-control payload for [`RampEffect`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RampState {
    pub color: Pixel,
    pub build_millis: i64,
    pub duration_millis: i64,
}

/// A self-timed opening cue: builds from black to `color` over
/// `build_millis`, then holds until `duration_millis` has elapsed.
///
/// The cue clock latches on the first `animate` after construction or
/// [`Cue::rewind`], so a sequencer can restart it in sync with its own cue.
#[derive(Debug)]
pub struct RampEffect {
    color: Pixel,
    build_millis: i64,
    duration_millis: i64,
    started_at: Option<i64>,
    interpolator: Interpolator,
    pixels: Vec<Pixel>,
    dirty: bool,
}

impl RampEffect {
    pub fn new(color: Pixel, build_millis: i64, duration_millis: i64) -> Self {
        Self {
            color,
            build_millis: build_millis.max(0),
            duration_millis: duration_millis.max(0),
            started_at: None,
            interpolator: Interpolator::default(),
            pixels: Vec::new(),
            dirty: true,
        }
    }

    /// Brightness in `[0, 1]` at `elapsed` millis into the cue.
    pub fn brightness_at(&self, elapsed: i64) -> f64 {
        if self.build_millis <= 0 || elapsed >= self.build_millis {
            return 1.0;
        }
        let pct = elapsed.max(0) as f64 / self.build_millis as f64;
        self.interpolator
            .interpolate(Interpolation::Sinusoidal, pct, 0.0, 1.0)
    }
}

impl Animate for RampEffect {
    fn animate(&mut self, time: TimePoint) {
        let now = time.scene_time_millis();
        let start = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(start);
        // Once fully built the frame only changes when the state does.
        if elapsed < self.build_millis || self.dirty {
            let level = self.brightness_at(elapsed) as f32;
            self.pixels.fill(self.color.scaled(level));
            self.dirty = elapsed < self.build_millis;
        }
    }
}

impl Render for RampEffect {
    fn render(&self) -> &[Pixel] {
        &self.pixels
    }
}

impl PatchDevices for RampEffect {
    fn patch_devices(&mut self, devices: &[Device]) {
        resize_buffer(&mut self.pixels, devices);
        self.dirty = true;
    }
}

impl Cue for RampEffect {
    fn cue_duration_millis(&self) -> i64 {
        self.duration_millis
    }

    fn rewind(&mut self) {
        self.started_at = None;
        self.dirty = true;
    }
}

impl Stateful for RampEffect {
    fn state_class(&self) -> StateClass {
        StateClass::Ramp
    }

    fn state(&self) -> RemoteState {
        RemoteState::Ramp(RampState {
            color: self.color,
            build_millis: self.build_millis,
            duration_millis: self.duration_millis,
        })
    }

    fn set_state(&mut self, state: RemoteState) -> LumaResult<()> {
        let RemoteState::Ramp(mut cmd) = state else {
            return Err(wrong_class(StateClass::Ramp, &state));
        };
        cmd.color.clip();
        self.color = cmd.color;
        if cmd.build_millis > 0 {
            self.build_millis = cmd.build_millis;
        }
        if cmd.duration_millis > 0 {
            self.duration_millis = cmd.duration_millis;
        }
        self.dirty = true;
        Ok(())
    }
}

impl Effect for RampEffect {
    fn as_cue(&self) -> Option<&dyn Cue> {
        Some(self)
    }

    fn as_cue_mut(&mut self) -> Option<&mut dyn Cue> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/ramp.rs"]
mod tests;
