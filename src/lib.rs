//! lumamix composites per-device light colors for architectural lighting
//! installations.
//!
//! A show is a stack of layers. Each layer wraps an effect that renders one
//! [`Pixel`] per patched [`Device`]; a [`Mixer`] scales every layer by its
//! level and folds the stack through a [`BlendOp`] into one frame, which a
//! [`Patch`] routes back out to device addresses.
//!
//! # Frame cycle
//!
//! 1. **Control**: queued remote commands are applied ([`ControlHandle`]).
//! 2. **Animate**: every unit advances to the frame's [`TimePoint`], then
//!    subscribed [`Animator`]s (such as the [`DairyShuffler`]) adjust levels.
//! 3. **Mix down**: layers composite background to foreground.
//! 4. **Route**: pixels pair with device addresses.
//!
//! [`Show::tick`] runs one cycle. Everything except remote control runs on a
//! single frame thread; the pipeline holds no locks while compositing.
#![forbid(unsafe_code)]

mod animation;
mod effects;
mod foundation;
mod mix;
mod patch;
mod scene;
mod show;

pub use animation::interpolator::{Interpolation, Interpolator};
pub use effects::effect::{
    Animate, Cue, Effect, PatchDevices, RemoteState, Render, StateClass, Stateful,
};
pub use effects::monochrome::MonochromeEffect;
pub use effects::pulse::{PulseEffect, PulseState};
pub use effects::ramp::{RampEffect, RampState};
pub use foundation::core::{Point3, TimePoint};
pub use foundation::error::{LumaError, LumaResult};
pub use foundation::pixel::Pixel;
pub use foundation::signal::TriangleSignal;
pub use mix::animator::{Animator, AnimatorId};
pub use mix::blend::{BlendOp, FnBlend, MaxBlend};
pub use mix::layer::Layer;
pub use mix::mixer::{Mixable, Mixer};
pub use patch::bounds::Bounds3;
pub use patch::device::{Device, PatchElement};
pub use patch::map::{DeviceColor, Patch, load_patch_sheet, parse_patch_sheet};
pub use scene::shuffler::{
    DEFAULT_TEXTURE_CUE_MILLIS, DairyShuffler, ShufflerMode, ShufflerState, SlotLevels,
};
pub use scene::timing::{FadeTiming, fade_in_fraction, fade_out_fraction};
pub use show::config::{EffectConfig, LayerConfig, ShowConfig, ShufflerConfig};
pub use show::control::{Command, ControlHandle, Target};
pub use show::runner::Show;
