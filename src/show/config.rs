use std::path::Path;

use anyhow::Context as _;

use crate::{
    effects::{effect::Effect, monochrome::MonochromeEffect, pulse::PulseEffect, ramp::RampEffect},
    foundation::{
        error::{LumaError, LumaResult},
        pixel::Pixel,
    },
    mix::{
        layer::Layer,
        mixer::{Mixable, Mixer},
    },
    patch::map::Patch,
    scene::{shuffler::DairyShuffler, timing::FadeTiming},
    show::runner::Show,
};

fn default_fps() -> u32 {
    30
}

fn default_level() -> f64 {
    1.0
}

/// Declarative description of a show: the layer stack, an optional scene
/// sequencer, and the frame rate.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShowConfig {
    pub layers: Vec<LayerConfig>,
    #[serde(default)]
    pub shuffler: Option<ShufflerConfig>,
    #[serde(default = "default_fps")]
    pub fps: u32,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_level")]
    pub level: f64,
    pub effect: EffectConfig,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectConfig {
    Monochrome {
        color: Pixel,
    },
    Pulse {
        color: Pixel,
        period_millis: u64,
        #[serde(default)]
        spread: f32,
    },
    Ramp {
        color: Pixel,
        build_millis: i64,
        duration_millis: i64,
    },
}

impl EffectConfig {
    fn build(&self) -> Box<dyn Effect> {
        match *self {
            Self::Monochrome { color } => Box::new(MonochromeEffect::new(color)),
            Self::Pulse {
                color,
                period_millis,
                spread,
            } => Box::new(PulseEffect::new(color, period_millis).with_spread(spread)),
            Self::Ramp {
                color,
                build_millis,
                duration_millis,
            } => Box::new(RampEffect::new(color, build_millis, duration_millis)),
        }
    }
}

/// Layout of the scene sequencer. `timings` lists one `[fade_in, fade_out]`
/// pair per shuffled layer, in order from `start` to `end`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShufflerConfig {
    pub woven: usize,
    pub start: usize,
    pub end: usize,
    pub timings: Vec<FadeTiming>,
    #[serde(default)]
    pub texture_cue_millis: Option<i64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ShufflerConfig {
    /// Spread the per-shuffled-layer timings across every mixer slot.
    fn slot_timings(&self, unit_count: usize) -> LumaResult<Vec<Option<FadeTiming>>> {
        let expected = self.end.saturating_sub(self.start) + 1;
        if self.end < self.start || self.timings.len() != expected {
            return Err(LumaError::config(format!(
                "shuffler range {}..={} needs {expected} timings, got {}",
                self.start,
                self.end,
                self.timings.len()
            )));
        }
        let mut slots = vec![None; unit_count];
        for (slot, timing) in slots
            .iter_mut()
            .skip(self.start)
            .zip(self.timings.iter().copied())
        {
            *slot = Some(timing);
        }
        Ok(slots)
    }
}

impl ShowConfig {
    pub fn from_json(json: &str) -> LumaResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> LumaResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read show config '{}'", path.display()))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> LumaResult<()> {
        if self.layers.is_empty() {
            return Err(LumaError::config("a show needs at least one layer"));
        }
        if self.fps == 0 {
            return Err(LumaError::config("fps must be positive"));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.level.is_finite() {
                return Err(LumaError::config(format!("layer {i} has a non-finite level")));
            }
        }
        if let Some(shuffler) = &self.shuffler {
            if matches!(shuffler.texture_cue_millis, Some(ms) if ms <= 0) {
                return Err(LumaError::config("texture_cue_millis must be positive"));
            }
            for timing in &shuffler.timings {
                timing.validate()?;
            }
        }
        Ok(())
    }

    /// Assemble the mixer, subscribe the sequencer, and patch the result.
    #[tracing::instrument(skip_all, fields(layers = self.layers.len()))]
    pub fn build(&self, patch: Patch) -> LumaResult<Show> {
        self.validate()?;
        let units: Vec<Mixable> = self
            .layers
            .iter()
            .map(|l| Mixable::from(Layer::new(l.name.clone(), l.effect.build()).with_level(l.level)))
            .collect();
        let mut mixer = Mixer::new(units);

        let shuffler = match &self.shuffler {
            Some(cfg) => {
                let timings = cfg.slot_timings(mixer.len())?;
                let mut seq = DairyShuffler::new(&mut mixer, cfg.woven, cfg.start, cfg.end, timings)?;
                if let Some(seed) = cfg.seed {
                    seq = seq.with_seed(seed);
                }
                if let Some(ms) = cfg.texture_cue_millis {
                    seq = seq.with_texture_cue_millis(ms);
                }
                Some(mixer.subscribe(Box::new(seq)))
            }
            None => None,
        };
        tracing::debug!(shuffled = shuffler.is_some(), "built show");

        Ok(Show::new(mixer, patch)
            .with_fps(self.fps)
            .with_shuffler(shuffler))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/config.rs"]
mod tests;
