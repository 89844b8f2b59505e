use rand::{SeedableRng, rngs::StdRng};

use crate::{
    animation::interpolator::{Interpolation, Interpolator},
    effects::effect::{RemoteState, StateClass, Stateful, wrong_class},
    foundation::{
        core::TimePoint,
        error::{LumaError, LumaResult},
    },
    mix::{
        animator::{Animator, AnimatorId},
        mixer::Mixer,
    },
    scene::timing::{FadeTiming, fade_in_fraction, fade_out_fraction},
};

/// Texture cue length used until a remote command changes it.
pub const DEFAULT_TEXTURE_CUE_MILLIS: i64 = 75_000;

/// The cue after the last texture has come in only fades the survivor out,
/// so it runs at this fraction of the normal length.
const FINAL_CUE_SCALE: f64 = 0.2;

/// Thresholds for redrawing easing curves on every texture step, out of 100.
const MODE_THRESHOLDS: (u32, u32, u32) = (35, 55, 95);

/// Top-level sequencer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ShufflerMode {
    /// The woven layer plays its own self-timed cue at full level.
    Woven,
    /// Shuffled layers crossfade in a sliding outgoing/primary/incoming window.
    Texture,
}

/// Remote-control payload for [`DairyShuffler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShufflerState {
    pub enabled: bool,
    /// Texture cue length. Non-positive values are ignored on `set_state`.
    pub cue_duration_millis: i64,
}

/// The levels the sequencer last computed for each slot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SlotLevels {
    pub incoming: f64,
    pub primary: f64,
    pub outgoing: f64,
    pub woven: f64,
}

/// Automates which layers of a [`Mixer`] are visible and how strongly.
///
/// A show opens with the woven layer alone for the length of its own cue.
/// Then the shuffled layers `[shuffle_start, shuffle_end]` are walked one
/// texture cue at a time: on each cue one layer fades in, the previous one
/// holds at full level and the one before that fades out. After the last
/// layer has faded out the sequencer returns to the woven cue and starts over.
///
/// Every decision is made from scene time alone. Transitions are handled
/// before the continuous level update within the same frame.
#[derive(Debug)]
pub struct DairyShuffler {
    woven_index: usize,
    shuffle_start: usize,
    shuffle_end: usize,
    timings: Vec<Option<FadeTiming>>,
    interpolator: Interpolator,
    rng: StdRng,

    enabled: bool,
    mode: ShufflerMode,
    cue_start_millis: Option<i64>,
    cue_duration_millis: i64,
    texture_cue_duration_millis: i64,
    incoming_index: isize,
    levels: SlotLevels,
    incoming_mode: Interpolation,
    outgoing_mode: Interpolation,
}

impl DairyShuffler {
    /// Validate the layout against `mixer` and rewind the woven cue.
    ///
    /// `timings` needs exactly one entry per mixer unit: `Some` inside the
    /// shuffle range, `None` outside it. The woven unit must be a layer whose
    /// effect is a [`Cue`](crate::Cue).
    pub fn new(
        mixer: &mut Mixer,
        woven_index: usize,
        shuffle_start: usize,
        shuffle_end: usize,
        timings: Vec<Option<FadeTiming>>,
    ) -> LumaResult<Self> {
        let ct = mixer.len();
        if woven_index >= ct {
            return Err(LumaError::config(format!(
                "mixer has no unit at woven index {woven_index}"
            )));
        }
        if shuffle_start >= ct {
            return Err(LumaError::config(format!(
                "mixer has no unit at shuffle start index {shuffle_start}"
            )));
        }
        if shuffle_end >= ct {
            return Err(LumaError::config(format!(
                "mixer has no unit at shuffle end index {shuffle_end}"
            )));
        }
        if shuffle_end <= shuffle_start {
            return Err(LumaError::config(
                "shuffle end index must exceed shuffle start index",
            ));
        }
        if (shuffle_start..=shuffle_end).contains(&woven_index) {
            return Err(LumaError::config(
                "the woven layer may not also be a shuffled layer",
            ));
        }
        if timings.len() != ct {
            return Err(LumaError::config(format!(
                "exactly {ct} fade timing slots are required, one per mixer unit, but {} were supplied",
                timings.len()
            )));
        }
        for (i, timing) in timings.iter().enumerate() {
            let in_range = (shuffle_start..=shuffle_end).contains(&i);
            match timing {
                None if in_range => {
                    return Err(LumaError::config(format!(
                        "shuffled layer {i} requires a fade timing"
                    )));
                }
                Some(_) if !in_range => {
                    return Err(LumaError::config(format!(
                        "layer {i} is not shuffled and must not have a fade timing"
                    )));
                }
                Some(t) => t.validate()?,
                None => {}
            }
        }
        if mixer
            .layer(woven_index)
            .and_then(|l| l.effect().as_cue())
            .is_none()
        {
            return Err(LumaError::config(format!(
                "unit {woven_index} must be a layer with a self-timed cue effect to serve as the woven layer"
            )));
        }

        let mut shuffler = Self {
            woven_index,
            shuffle_start,
            shuffle_end,
            timings,
            // A quick root fade in and a gradual power fade favor a strong
            // three-way mix.
            interpolator: Interpolator::new(0.15, 2.5),
            rng: StdRng::from_entropy(),
            enabled: true,
            mode: ShufflerMode::Woven,
            cue_start_millis: None,
            cue_duration_millis: 0,
            texture_cue_duration_millis: DEFAULT_TEXTURE_CUE_MILLIS,
            incoming_index: -1,
            levels: SlotLevels {
                incoming: 0.0,
                primary: 0.0,
                outgoing: 0.0,
                woven: 0.0,
            },
            incoming_mode: Interpolation::Sinusoidal,
            outgoing_mode: Interpolation::Sinusoidal,
        };
        shuffler.reset(mixer);
        Ok(shuffler)
    }

    /// Build a shuffler and subscribe it to `mixer`.
    pub fn subscribe(
        mixer: &mut Mixer,
        woven_index: usize,
        shuffle_start: usize,
        shuffle_end: usize,
        timings: Vec<Option<FadeTiming>>,
    ) -> LumaResult<AnimatorId> {
        let shuffler = Self::new(mixer, woven_index, shuffle_start, shuffle_end, timings)?;
        Ok(mixer.subscribe(Box::new(shuffler)))
    }

    /// Replace the random source with a seeded one for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Non-positive values are ignored.
    pub fn with_texture_cue_millis(mut self, millis: i64) -> Self {
        if millis > 0 {
            self.texture_cue_duration_millis = millis;
        }
        self
    }

    /// Re-enter woven mode from a cold start and rewind the woven cue.
    pub fn reset(&mut self, mixer: &mut Mixer) {
        self.mode = ShufflerMode::Woven;
        match mixer
            .layer_mut(self.woven_index)
            .and_then(|l| l.effect_mut().as_cue_mut())
        {
            Some(cue) => {
                self.cue_duration_millis = cue.cue_duration_millis();
                cue.rewind();
            }
            None => tracing::warn!(
                woven_index = self.woven_index,
                "woven layer lost its cue; keeping the previous cue duration"
            ),
        }
        self.incoming_index = -1;
        self.levels = SlotLevels {
            incoming: 0.0,
            primary: 0.0,
            outgoing: 0.0,
            woven: 0.0,
        };
        self.incoming_mode = Interpolation::Sinusoidal;
        self.outgoing_mode = Interpolation::Sinusoidal;
        self.cue_start_millis = None;
    }

    pub fn mode(&self) -> ShufflerMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Index of the layer currently fading in; negative in woven mode.
    pub fn incoming_index(&self) -> isize {
        self.incoming_index
    }

    pub fn levels(&self) -> SlotLevels {
        self.levels
    }

    pub fn cue_start_millis(&self) -> Option<i64> {
        self.cue_start_millis
    }

    pub fn cue_duration_millis(&self) -> i64 {
        self.cue_duration_millis
    }

    pub fn texture_cue_duration_millis(&self) -> i64 {
        self.texture_cue_duration_millis
    }

    pub fn easing_modes(&self) -> (Interpolation, Interpolation) {
        (self.incoming_mode, self.outgoing_mode)
    }

    /// Step forward, or rewind to woven mode, once the current cue elapses.
    fn advance(&mut self, mixer: &mut Mixer) {
        let end = self.shuffle_end as isize;
        match self.mode {
            ShufflerMode::Woven => {
                self.cue_duration_millis = self.texture_cue_duration_millis;
                self.mode = ShufflerMode::Texture;
                self.levels.woven = 0.0;
                if let Some(unit) = mixer.unit_mut(self.woven_index) {
                    unit.set_level(0.0);
                }
                self.incoming_index = self.shuffle_start as isize;
                // Fade the first texture in quickly so the rig never sits dark.
                self.incoming_mode = Interpolation::Root;
                tracing::debug!(incoming = self.incoming_index, "woven cue done, entering texture mode");
            }
            ShufflerMode::Texture if self.incoming_index >= end + 2 => {
                for i in self.shuffle_start..=self.shuffle_end {
                    self.set_texture_level(mixer, 0.0, i as isize);
                }
                self.reset(mixer);
                tracing::debug!("every texture has played, returning to the woven cue");
            }
            ShufflerMode::Texture => {
                let (a, b, c) = MODE_THRESHOLDS;
                self.incoming_mode = self.interpolator.random_mode(a, b, c, &mut self.rng);
                self.outgoing_mode = self.interpolator.random_mode(a, b, c, &mut self.rng);

                self.cue_duration_millis = self.texture_cue_duration_millis;
                if self.incoming_index > end {
                    // Nothing new is coming in; keep the fade to black brief.
                    self.cue_duration_millis =
                        (self.cue_duration_millis as f64 * FINAL_CUE_SCALE) as i64;
                }

                // Finish any outgoing fade that is still in flight.
                self.set_texture_level(mixer, 0.0, self.incoming_index - 2);
                self.levels.outgoing = self.levels.primary;
                self.levels.primary = self.levels.incoming;
                self.levels.incoming = 0.0;
                self.incoming_index += 1;
                tracing::debug!(
                    incoming = self.incoming_index,
                    cue_millis = self.cue_duration_millis,
                    incoming_mode = ?self.incoming_mode,
                    outgoing_mode = ?self.outgoing_mode,
                    "texture step"
                );
            }
        }
    }

    fn crossfade(&mut self, now: i64, cue_start: i64, mixer: &mut Mixer) {
        let li = self.incoming_index;
        let out_timing = self.timing_near(li - 2);
        let in_timing = self.timing_near(li);

        let cue_pct = if self.cue_duration_millis <= 0 {
            1.0
        } else {
            (now.saturating_sub(cue_start) as f64 / self.cue_duration_millis as f64).clamp(0.0, 1.0)
        };
        let out_frac = fade_out_fraction(cue_pct, out_timing.fade_out);
        let in_frac = fade_in_fraction(cue_pct, in_timing.fade_in);

        self.levels.incoming = self
            .interpolator
            .interpolate(self.incoming_mode, in_frac, 0.0, 1.0);
        self.set_texture_level(mixer, self.levels.incoming, li);

        self.levels.primary = 1.0;
        self.set_texture_level(mixer, self.levels.primary, li - 1);

        self.levels.outgoing = self
            .interpolator
            .interpolate(self.outgoing_mode, out_frac, 1.0, 0.0);
        self.set_texture_level(mixer, self.levels.outgoing, li - 2);
    }

    /// Fade timing for `slot`, borrowing the nearest end of the shuffle range
    /// when the slot lies outside it. Such a slot's level is never applied.
    fn timing_near(&self, slot: isize) -> FadeTiming {
        let idx = slot.clamp(self.shuffle_start as isize, self.shuffle_end as isize) as usize;
        self.timings.get(idx).copied().flatten().unwrap_or_default()
    }

    /// Only shuffled layers are touched; the woven layer handles its own
    /// dynamics and out-of-range slots are ignored.
    fn set_texture_level(&self, mixer: &mut Mixer, level: f64, slot: isize) {
        if slot < self.shuffle_start as isize || slot > self.shuffle_end as isize {
            return;
        }
        if let Some(unit) = mixer.unit_mut(slot as usize) {
            unit.set_level(level);
        }
    }
}

impl Animator for DairyShuffler {
    fn animate(&mut self, time: TimePoint, mixer: &mut Mixer) {
        if !self.enabled {
            return;
        }
        let now = time.scene_time_millis();
        let cue_start = *self.cue_start_millis.get_or_insert(now);
        if now >= cue_start.saturating_add(self.cue_duration_millis) {
            self.advance(mixer);
            self.cue_start_millis = Some(now);
        }
        let cue_start = self.cue_start_millis.unwrap_or(now);

        match self.mode {
            ShufflerMode::Woven => {
                // The woven cue builds from black on its own; only snap it on.
                if cue_start == now {
                    self.levels.woven = 1.0;
                    if let Some(unit) = mixer.unit_mut(self.woven_index) {
                        unit.set_level(self.levels.woven);
                    }
                }
            }
            ShufflerMode::Texture => self.crossfade(now, cue_start, mixer),
        }
    }
}

impl Stateful for DairyShuffler {
    fn state_class(&self) -> StateClass {
        StateClass::Shuffler
    }

    fn state(&self) -> RemoteState {
        RemoteState::Shuffler(ShufflerState {
            enabled: self.enabled,
            cue_duration_millis: self.texture_cue_duration_millis,
        })
    }

    fn set_state(&mut self, state: RemoteState) -> LumaResult<()> {
        let RemoteState::Shuffler(cmd) = state else {
            return Err(wrong_class(StateClass::Shuffler, &state));
        };
        self.enabled = cmd.enabled;
        if cmd.cue_duration_millis > 0 {
            self.texture_cue_duration_millis = cmd.cue_duration_millis;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shuffler.rs"]
mod tests;
