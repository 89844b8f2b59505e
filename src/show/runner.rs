use crate::{
    effects::effect::{RemoteState, Stateful},
    foundation::{
        core::TimePoint,
        error::{LumaError, LumaResult},
    },
    mix::{
        animator::AnimatorId,
        mixer::{Mixable, Mixer},
    },
    patch::map::{DeviceColor, Patch},
    show::control::{Command, ControlHandle, ControlHub, Target},
};

/// A patched mixer plus its remote-control inbox. One `tick` produces one
/// routed frame.
#[derive(Debug)]
pub struct Show {
    mixer: Mixer,
    patch: Patch,
    fps: u32,
    shuffler: Option<AnimatorId>,
    control: ControlHub,
}

impl Show {
    /// Patches `mixer` with the devices of `patch`.
    pub fn new(mut mixer: Mixer, patch: Patch) -> Self {
        mixer.patch_devices(patch.devices());
        let show = Self {
            mixer,
            patch,
            fps: 30,
            shuffler: None,
            control: ControlHub::new(),
        };
        show.publish();
        show
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_shuffler(mut self, id: Option<AnimatorId>) -> Self {
        self.shuffler = id;
        self.publish();
        self
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn shuffler(&self) -> Option<AnimatorId> {
        self.shuffler
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut Mixer {
        &mut self.mixer
    }

    pub fn patch(&self) -> &Patch {
        &self.patch
    }

    /// Swap in a new device layout and re-patch every effect.
    pub fn repatch(&mut self, patch: Patch) {
        self.mixer.patch_devices(patch.devices());
        self.patch = patch;
    }

    pub fn control(&self) -> ControlHandle {
        self.control.handle()
    }

    /// Apply queued commands, then animate, mix down and route one frame.
    ///
    /// A command that fails validation is logged and dropped; it never
    /// aborts the frame.
    pub fn tick(&mut self, time: TimePoint) -> LumaResult<Vec<DeviceColor>> {
        for command in self.control.drain() {
            if let Err(err) = self.apply(&command) {
                tracing::warn!(command_target = ?command.target, %err, "dropping control command");
            }
        }

        self.mixer.animate(time);
        let frame = self.mixer.mixdown()?;
        let routed = self.patch.route(frame)?;
        self.publish();
        Ok(routed)
    }

    /// Apply one command immediately.
    pub fn apply(&mut self, command: &Command) -> LumaResult<()> {
        match command.target {
            Target::Layer(index) => match self.mixer.unit_mut(index) {
                Some(Mixable::Layer(layer)) => layer.set_state(command.state),
                Some(Mixable::Mixer(_)) => Err(LumaError::state(format!(
                    "unit {index} is a nested mixer and has no remote state"
                ))),
                None => Err(LumaError::state(format!("no layer at index {index}"))),
            },
            Target::Animator(id) => match self.mixer.animator_mut(id) {
                Some(animator) => animator.set_state(command.state),
                None => Err(LumaError::state(format!("no animator with id {}", id.0))),
            },
        }
    }

    /// Current state of `target`, read directly on the frame thread.
    pub fn state_of(&self, target: Target) -> Option<RemoteState> {
        match target {
            Target::Layer(index) => self.mixer.layer(index).map(Stateful::state),
            Target::Animator(id) => self.mixer.animator(id).map(|a| a.state()),
        }
    }

    fn publish(&self) {
        let layers = self
            .mixer
            .units()
            .iter()
            .enumerate()
            .filter_map(|(i, unit)| unit.as_layer().map(|l| (Target::Layer(i), l.state())));
        let animators = (0..self.mixer.animator_count()).filter_map(|i| {
            let id = AnimatorId(i);
            self.mixer
                .animator(id)
                .map(|a| (Target::Animator(id), a.state()))
        });
        self.control.publish(layers.chain(animators));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/runner.rs"]
mod tests;
