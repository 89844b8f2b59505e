use crate::{
    foundation::{
        core::TimePoint,
        error::{LumaError, LumaResult},
        pixel::Pixel,
    },
    mix::{
        animator::{Animator, AnimatorId},
        blend::{BlendOp, MaxBlend},
        layer::{Layer, clip_level},
    },
    patch::device::Device,
};

/// A compositable unit: a single layer or a nested mixer.
#[derive(Debug)]
pub enum Mixable {
    Layer(Layer),
    Mixer(Mixer),
}

impl Mixable {
    pub fn level(&self) -> f64 {
        match self {
            Self::Layer(l) => l.level(),
            Self::Mixer(m) => m.level(),
        }
    }

    pub fn set_level(&mut self, level: f64) {
        match self {
            Self::Layer(l) => l.set_level(level),
            Self::Mixer(m) => m.set_level(level),
        }
    }

    pub fn animate(&mut self, time: TimePoint) {
        match self {
            Self::Layer(l) => l.animate(time),
            Self::Mixer(m) => m.animate(time),
        }
    }

    pub fn patch_devices(&mut self, devices: &[Device]) {
        match self {
            Self::Layer(l) => l.patch_devices(devices),
            Self::Mixer(m) => m.patch_devices(devices),
        }
    }

    pub fn as_layer(&self) -> Option<&Layer> {
        match self {
            Self::Layer(l) => Some(l),
            Self::Mixer(_) => None,
        }
    }

    pub fn as_layer_mut(&mut self) -> Option<&mut Layer> {
        match self {
            Self::Layer(l) => Some(l),
            Self::Mixer(_) => None,
        }
    }
}

impl From<Layer> for Mixable {
    fn from(layer: Layer) -> Self {
        Self::Layer(layer)
    }
}

impl From<Mixer> for Mixable {
    fn from(mixer: Mixer) -> Self {
        Self::Mixer(mixer)
    }
}

/// An ordered stack of compositable units. The first unit is the background
/// and the last is the foreground.
///
/// Per frame: [`animate`](Self::animate), then [`mixdown`](Self::mixdown),
/// then hand the buffer to [`Patch::route`](crate::Patch::route).
#[derive(Debug)]
pub struct Mixer {
    units: Vec<Mixable>,
    pixels: Vec<Pixel>,
    blend: Box<dyn BlendOp>,
    level: f64,
    animators: Vec<Box<dyn Animator>>,
    patched: bool,
}

impl Mixer {
    pub fn new(units: Vec<Mixable>) -> Self {
        Self {
            units,
            pixels: Vec::new(),
            blend: Box::new(MaxBlend),
            level: 1.0,
            animators: Vec::new(),
            patched: false,
        }
    }

    pub fn with_blend_op(mut self, blend: Box<dyn BlendOp>) -> Self {
        self.blend = blend;
        self
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[Mixable] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Option<&Mixable> {
        self.units.get(index)
    }

    pub fn unit_mut(&mut self, index: usize) -> Option<&mut Mixable> {
        self.units.get_mut(index)
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.unit(index).and_then(Mixable::as_layer)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.unit_mut(index).and_then(Mixable::as_layer_mut)
    }

    /// Level of this mixer when it is nested inside another.
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn set_level(&mut self, level: f64) {
        self.level = clip_level(level);
    }

    /// Register an animator to run after the unit pass of every `animate`.
    /// Animators run in subscription order.
    pub fn subscribe(&mut self, animator: Box<dyn Animator>) -> AnimatorId {
        self.animators.push(animator);
        AnimatorId(self.animators.len() - 1)
    }

    pub fn animator(&self, id: AnimatorId) -> Option<&dyn Animator> {
        self.animators.get(id.0).map(|a| &**a)
    }

    pub fn animator_mut(&mut self, id: AnimatorId) -> Option<&mut (dyn Animator + 'static)> {
        self.animators.get_mut(id.0).map(|a| a.as_mut())
    }

    pub fn animator_count(&self) -> usize {
        self.animators.len()
    }

    /// Animate every unit in stack order, then run each subscribed animator
    /// exactly once.
    pub fn animate(&mut self, time: TimePoint) {
        for unit in &mut self.units {
            unit.animate(time);
        }

        // Detach the animators so each one can borrow the whole mixer.
        let mut animators = std::mem::take(&mut self.animators);
        for animator in &mut animators {
            animator.animate(time, self);
        }
        animators.append(&mut self.animators);
        self.animators = animators;
    }

    /// Composite every unit, background to foreground, into the working
    /// buffer.
    ///
    /// Each unit's pixels are scaled by its level and folded in channel by
    /// channel through the blend op. A buffer whose length differs from the
    /// device count, or a mixer that was never patched, is a configuration
    /// error.
    pub fn mixdown(&mut self) -> LumaResult<&[Pixel]> {
        if !self.patched {
            return Err(LumaError::config(
                "mixer has no pixel buffer; call patch_devices before mixdown",
            ));
        }
        self.pixels.fill(Pixel::black());

        let blend = self.blend.as_ref();
        for (index, unit) in self.units.iter_mut().enumerate() {
            let level = unit.level() as f32;
            let src = match unit {
                Mixable::Layer(layer) => layer.render(),
                Mixable::Mixer(mixer) => mixer.mixdown()?,
            };
            if src.len() != self.pixels.len() {
                return Err(LumaError::config(format!(
                    "unit {index} rendered {} pixels but {} devices are patched",
                    src.len(),
                    self.pixels.len()
                )));
            }
            for (dst, &px) in self.pixels.iter_mut().zip(src) {
                dst.blend_with(px.scaled(level), blend);
            }
        }
        Ok(&self.pixels)
    }

    /// The buffer produced by the last mixdown.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Propagate the device universe to every unit and size the working
    /// buffer. Call before the first frame and whenever the layout changes.
    pub fn patch_devices(&mut self, devices: &[Device]) {
        self.pixels.clear();
        self.pixels.resize(devices.len(), Pixel::black());
        for unit in &mut self.units {
            unit.patch_devices(devices);
        }
        self.patched = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mix/mixer.rs"]
mod tests;
