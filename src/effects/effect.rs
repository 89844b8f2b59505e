use crate::{
    effects::{pulse::PulseState, ramp::RampState},
    foundation::{
        core::TimePoint,
        error::{LumaError, LumaResult},
        pixel::Pixel,
    },
    patch::device::Device,
    scene::shuffler::ShufflerState,
};

/// Advances internal state to a time point.
pub trait Animate {
    fn animate(&mut self, time: TimePoint);
}

/// Exposes the current frame. One pixel per patched device.
pub trait Render {
    fn render(&self) -> &[Pixel];
}

/// Sizes and addresses internal buffers for a device universe. Called once
/// before the first frame and again whenever the layout changes.
pub trait PatchDevices {
    fn patch_devices(&mut self, devices: &[Device]);
}

/// Remote inspection and control.
///
/// `state` always returns an independent copy. `set_state` validates the
/// payload, clips colors and marks the target dirty; the redraw happens on
/// the next `animate`.
pub trait Stateful {
    fn state_class(&self) -> StateClass;
    fn state(&self) -> RemoteState;
    fn set_state(&mut self, state: RemoteState) -> LumaResult<()>;
}

/// A self-timed effect that can open a scene. The sequencer reads its
/// duration and rewinds it whenever it re-enters woven mode.
pub trait Cue {
    fn cue_duration_millis(&self) -> i64;
    fn rewind(&mut self);
}

/// The full capability set a layer needs from its effect.
pub trait Effect: Animate + Render + PatchDevices + Stateful + Send + std::fmt::Debug {
    fn as_cue(&self) -> Option<&dyn Cue> {
        None
    }

    fn as_cue_mut(&mut self) -> Option<&mut dyn Cue> {
        None
    }
}

/// Type tag for the payload a [`Stateful`] target accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Color,
    Pulse,
    Ramp,
    Shuffler,
}

/// Snapshot or command payload exchanged over the remote-control contract.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "class", content = "value", rename_all = "snake_case")]
pub enum RemoteState {
    Color(Pixel),
    Pulse(PulseState),
    Ramp(RampState),
    Shuffler(ShufflerState),
}

impl RemoteState {
    pub fn class(&self) -> StateClass {
        match self {
            Self::Color(_) => StateClass::Color,
            Self::Pulse(_) => StateClass::Pulse,
            Self::Ramp(_) => StateClass::Ramp,
            Self::Shuffler(_) => StateClass::Shuffler,
        }
    }
}

pub(crate) fn wrong_class(expected: StateClass, got: &RemoteState) -> LumaError {
    LumaError::state(format!(
        "expected a {expected:?} payload, got {:?}",
        got.class()
    ))
}

/// Resize `pixels` to one black pixel per device.
pub(crate) fn resize_buffer(pixels: &mut Vec<Pixel>, devices: &[Device]) {
    pixels.clear();
    pixels.resize(devices.len(), Pixel::black());
}

#[cfg(test)]
#[path = "../../tests/unit/effects/effect.rs"]
mod tests;
