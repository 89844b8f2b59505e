use crate::{effects::effect::Stateful, foundation::core::TimePoint, mix::mixer::Mixer};

/// An autonomous per-frame controller subscribed to a [`Mixer`].
///
/// Animators run once per `Mixer::animate`, after every unit has animated,
/// and receive the mixer so they can override unit levels before mixdown.
pub trait Animator: Stateful + Send + std::fmt::Debug {
    fn animate(&mut self, time: TimePoint, mixer: &mut Mixer);
}

/// Handle returned by [`Mixer::subscribe`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AnimatorId(pub usize);
