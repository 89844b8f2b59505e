use crate::foundation::error::{LumaError, LumaResult};

/// Fraction of a texture cue spent fading a layer in and out.
///
/// Serialized as `[fade_in, fade_out]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct FadeTiming {
    pub fade_in: f64,
    pub fade_out: f64,
}

impl FadeTiming {
    pub fn new(fade_in: f64, fade_out: f64) -> Self {
        Self { fade_in, fade_out }
    }

    pub fn validate(&self) -> LumaResult<()> {
        for (name, v) in [("fade_in", self.fade_in), ("fade_out", self.fade_out)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(LumaError::config(format!(
                    "fade timing {name} must be within [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }
}

impl From<[f64; 2]> for FadeTiming {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<FadeTiming> for [f64; 2] {
    fn from(t: FadeTiming) -> Self {
        [t.fade_in, t.fade_out]
    }
}

/// Progress of the outgoing fade at `cue_pct`: done (1) once the cue passes
/// `fade_out`, inclusive.
pub fn fade_out_fraction(cue_pct: f64, fade_out: f64) -> f64 {
    if cue_pct >= fade_out || fade_out == 0.0 {
        1.0
    } else {
        cue_pct / fade_out
    }
}

/// Progress of the incoming fade at `cue_pct`: not started (0) until the cue
/// passes `1 - fade_in`, inclusive.
pub fn fade_in_fraction(cue_pct: f64, fade_in: f64) -> f64 {
    let threshold = 1.0 - fade_in;
    if cue_pct <= threshold || fade_in == 0.0 {
        0.0
    } else {
        (cue_pct - threshold) / fade_in
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/timing.rs"]
mod tests;
