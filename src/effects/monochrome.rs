use crate::{
    effects::effect::{
        Animate, Effect, PatchDevices, RemoteState, Render, StateClass, Stateful, resize_buffer,
        wrong_class,
    },
    foundation::{core::TimePoint, error::LumaResult, pixel::Pixel},
    patch::device::Device,
};

/// Show a single color on every device.
///
/// Repaints only on frames after the color changed or the layout was patched.
#[derive(Debug)]
pub struct MonochromeEffect {
    color: Pixel,
    pixels: Vec<Pixel>,
    dirty: bool,
}

impl MonochromeEffect {
    pub fn new(color: Pixel) -> Self {
        Self {
            color,
            pixels: Vec::new(),
            dirty: true,
        }
    }

    pub fn color(&self) -> Pixel {
        self.color
    }

    /// Does not dirty the effect if the color is unchanged.
    pub fn set_color(&mut self, color: Pixel) {
        if self.color != color {
            self.color = color;
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Animate for MonochromeEffect {
    fn animate(&mut self, _time: TimePoint) {
        if self.dirty {
            self.pixels.fill(self.color);
            self.dirty = false;
        }
    }
}

impl Render for MonochromeEffect {
    fn render(&self) -> &[Pixel] {
        &self.pixels
    }
}

impl PatchDevices for MonochromeEffect {
    fn patch_devices(&mut self, devices: &[Device]) {
        resize_buffer(&mut self.pixels, devices);
        self.dirty = true;
    }
}

impl Stateful for MonochromeEffect {
    fn state_class(&self) -> StateClass {
        StateClass::Color
    }

    fn state(&self) -> RemoteState {
        RemoteState::Color(self.color)
    }

    fn set_state(&mut self, state: RemoteState) -> LumaResult<()> {
        match state {
            RemoteState::Color(mut color) => {
                color.clip();
                self.set_color(color);
                Ok(())
            }
            other => Err(wrong_class(StateClass::Color, &other)),
        }
    }
}

impl Effect for MonochromeEffect {}

#[cfg(test)]
#[path = "../../tests/unit/effects/monochrome.rs"]
mod tests;
