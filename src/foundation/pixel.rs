/// Linear RGB color, each channel clipped to `[0, 1]`.
///
/// Every constructor and mutator clips, so a `Pixel` is always in range. NaN
/// channels clip to 0. Serialized as a compact `[r, g, b]` array.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Pixel {
    r: f32,
    g: f32,
    b: f32,
}

fn clip_channel(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

impl Pixel {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clip_channel(r),
            g: clip_channel(g),
            b: clip_channel(b),
        }
    }

    pub fn black() -> Self {
        Self::default()
    }

    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn r(self) -> f32 {
        self.r
    }

    pub fn g(self) -> f32 {
        self.g
    }

    pub fn b(self) -> f32 {
        self.b
    }

    pub fn set(&mut self, r: f32, g: f32, b: f32) {
        *self = Self::new(r, g, b);
    }

    pub fn set_color(&mut self, other: Pixel) {
        *self = other;
    }

    /// Re-clip in place. A no-op for any value produced through this API.
    pub fn clip(&mut self) {
        *self = Self::new(self.r, self.g, self.b);
    }

    /// Uniformly scale every channel, e.g. by a layer level.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Combine `foreground` into `self` channel by channel.
    pub fn blend_with(&mut self, foreground: Pixel, op: &dyn crate::mix::blend::BlendOp) {
        self.set(
            op.blend(self.r, foreground.r),
            op.blend(self.g, foreground.g),
            op.blend(self.b, foreground.b),
        );
    }
}

impl From<[f32; 3]> for Pixel {
    fn from(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Pixel> for [f32; 3] {
    fn from(p: Pixel) -> Self {
        [p.r, p.g, p.b]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/pixel.rs"]
mod tests;
