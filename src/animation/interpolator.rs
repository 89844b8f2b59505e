use rand::Rng;

/// Named easing curves. Every curve maps 0 to 0 and 1 to 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Linear,
    /// Half cosine: slow at both ends.
    Sinusoidal,
    /// `t^root_exponent`: rises fast, lingers near the top.
    Root,
    /// `t^power_exponent`: lingers near the bottom, rises late.
    Power,
}

impl Interpolation {
    pub const ALL: [Interpolation; 4] = [Self::Linear, Self::Sinusoidal, Self::Root, Self::Power];
}

/// Easing curve library. `Root` and `Power` are parameterized by the
/// interpolator's exponents.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Interpolator {
    pub root_exponent: f64,
    pub power_exponent: f64,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self {
            root_exponent: 0.5,
            power_exponent: 2.0,
        }
    }
}

impl Interpolator {
    pub fn new(root_exponent: f64, power_exponent: f64) -> Self {
        Self {
            root_exponent,
            power_exponent,
        }
    }

    /// Eased fraction for linear progress `t`, clamped to `[0, 1]`.
    pub fn curve(&self, mode: Interpolation, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match mode {
            Interpolation::Linear => t,
            Interpolation::Sinusoidal => 0.5 * (1.0 - (std::f64::consts::PI * t).cos()),
            Interpolation::Root => t.powf(self.root_exponent),
            Interpolation::Power => t.powf(self.power_exponent),
        }
    }

    /// Value between `from` and `to` at progress `pct` along `mode`.
    pub fn interpolate(&self, mode: Interpolation, pct: f64, from: f64, to: f64) -> f64 {
        let eased = self.curve(mode, pct);
        if eased >= 1.0 {
            return to;
        }
        from + (to - from) * eased
    }

    /// Threshold draw against a 0..100 roll: `Sinusoidal` below `a`, `Root`
    /// below `b`, `Power` below `c`, `Linear` otherwise.
    pub fn random_mode<R: Rng + ?Sized>(&self, a: u32, b: u32, c: u32, rng: &mut R) -> Interpolation {
        Self::mode_for_roll(rng.gen_range(0..100), a, b, c)
    }

    pub(crate) fn mode_for_roll(roll: u32, a: u32, b: u32, c: u32) -> Interpolation {
        if roll < a {
            Interpolation::Sinusoidal
        } else if roll < b {
            Interpolation::Root
        } else if roll < c {
            Interpolation::Power
        } else {
            Interpolation::Linear
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolator.rs"]
mod tests;
