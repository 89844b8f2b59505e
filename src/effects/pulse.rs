use crate::{
    effects::effect::{
        Animate, Effect, PatchDevices, RemoteState, Render, StateClass, Stateful, resize_buffer,
        wrong_class,
    },
    foundation::{core::TimePoint, error::LumaResult, pixel::Pixel, signal::TriangleSignal},
    patch::{bounds::Bounds3, device::Device},
};

/// Remote-control payload for [`PulseEffect`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PulseState {
    pub color: Pixel,
    pub period_millis: i64,
    /// Phase offset across the rig's x extent, as a fraction of one period.
    #[serde(default)]
    pub spread: f32,
}

/// A color breathing between black and full brightness on a triangle wave.
/// With a non-zero spread the wave travels along the x axis.
#[derive(Debug)]
pub struct PulseEffect {
    color: Pixel,
    signal: TriangleSignal,
    spread: f32,
    positions: Vec<f32>,
    pixels: Vec<Pixel>,
}

impl PulseEffect {
    pub fn new(color: Pixel, period_millis: u64) -> Self {
        Self {
            color,
            signal: TriangleSignal::new(0.0, 1.0, period_millis),
            spread: 0.0,
            positions: Vec::new(),
            pixels: Vec::new(),
        }
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = if spread.is_finite() { spread.clamp(0.0, 1.0) } else { 0.0 };
        self
    }
}

impl Animate for PulseEffect {
    fn animate(&mut self, time: TimePoint) {
        let period = self.signal.period_millis;
        if period == 0 {
            self.pixels.fill(self.color.scaled(self.signal.start));
            return;
        }
        let base = time.scene_time_millis().rem_euclid(period as i64) as f32 / period as f32;
        for (px, &pos) in self.pixels.iter_mut().zip(&self.positions) {
            let phase = (base + pos * self.spread).fract();
            *px = self.color.scaled(self.signal.interpolate(phase));
        }
    }
}

impl Render for PulseEffect {
    fn render(&self) -> &[Pixel] {
        &self.pixels
    }
}

impl PatchDevices for PulseEffect {
    fn patch_devices(&mut self, devices: &[Device]) {
        resize_buffer(&mut self.pixels, devices);
        let bounds = Bounds3::of_devices(devices);
        self.positions = devices
            .iter()
            .map(|d| bounds.map_or(0.0, |b| b.normalize(d.point()).x as f32))
            .collect();
    }
}

impl Stateful for PulseEffect {
    fn state_class(&self) -> StateClass {
        StateClass::Pulse
    }

    fn state(&self) -> RemoteState {
        RemoteState::Pulse(PulseState {
            color: self.color,
            period_millis: self.signal.period_millis as i64,
            spread: self.spread,
        })
    }

    fn set_state(&mut self, state: RemoteState) -> LumaResult<()> {
        let RemoteState::Pulse(mut cmd) = state else {
            return Err(wrong_class(StateClass::Pulse, &state));
        };
        cmd.color.clip();
        self.color = cmd.color;
        if cmd.period_millis > 0 {
            self.signal.period_millis = cmd.period_millis as u64;
        }
        if cmd.spread.is_finite() {
            self.spread = cmd.spread.clamp(0.0, 1.0);
        }
        Ok(())
    }
}

impl Effect for PulseEffect {}

#[cfg(test)]
#[path = "../../tests/unit/effects/pulse.rs"]
mod tests;
