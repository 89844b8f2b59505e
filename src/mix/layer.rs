use crate::{
    effects::effect::{Effect, RemoteState, StateClass, Stateful},
    foundation::{core::TimePoint, error::LumaResult, pixel::Pixel},
    patch::device::Device,
};

pub(crate) fn clip_level(level: f64) -> f64 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

/// One level-scaled effect inside a [`Mixer`](crate::Mixer).
///
/// The name and the effect are fixed at construction; the level may change
/// every frame.
#[derive(Debug)]
pub struct Layer {
    name: String,
    effect: Box<dyn Effect>,
    level: f64,
}

impl Layer {
    /// A fully opaque layer. An empty name becomes "Untitled".
    pub fn new(name: impl Into<String>, effect: Box<dyn Effect>) -> Self {
        let name = name.into();
        Self {
            name: if name.trim().is_empty() {
                "Untitled".to_string()
            } else {
                name
            },
            effect,
            level: 1.0,
        }
    }

    pub fn with_level(mut self, level: f64) -> Self {
        self.set_level(level);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Clamped to `[0, 1]`; NaN reads as 0.
    pub fn set_level(&mut self, level: f64) {
        self.level = clip_level(level);
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    pub fn effect_mut(&mut self) -> &mut dyn Effect {
        self.effect.as_mut()
    }

    pub fn animate(&mut self, time: TimePoint) {
        self.effect.animate(time);
    }

    pub fn render(&self) -> &[Pixel] {
        self.effect.render()
    }

    pub fn patch_devices(&mut self, devices: &[Device]) {
        self.effect.patch_devices(devices);
    }
}

impl Stateful for Layer {
    fn state_class(&self) -> StateClass {
        self.effect.state_class()
    }

    fn state(&self) -> RemoteState {
        self.effect.state()
    }

    fn set_state(&mut self, state: RemoteState) -> LumaResult<()> {
        self.effect.set_state(state)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mix/layer.rs"]
mod tests;
