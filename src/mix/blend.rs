/// Per-channel, per-pixel combination rule used during mixdown.
///
/// Implementations are stateless. Output is expected in `[0, 1]`; the mixer
/// clips whatever comes back, so out-of-range results are never stored.
pub trait BlendOp: Send + Sync + std::fmt::Debug {
    fn blend(&self, background: f32, foreground: f32) -> f32;
}

/// Channel-wise maximum. Commutative, associative and idempotent, so layer
/// order only matters through level scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaxBlend;

impl BlendOp for MaxBlend {
    fn blend(&self, background: f32, foreground: f32) -> f32 {
        let v = if background >= foreground {
            background
        } else {
            foreground
        };
        v.clamp(0.0, 1.0)
    }
}

/// Adapts any plain function or closure into a [`BlendOp`].
pub struct FnBlend<F>(pub F);

impl<F> BlendOp for FnBlend<F>
where
    F: Fn(f32, f32) -> f32 + Send + Sync,
{
    fn blend(&self, background: f32, foreground: f32) -> f32 {
        (self.0)(background, foreground).clamp(0.0, 1.0)
    }
}

impl<F> std::fmt::Debug for FnBlend<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnBlend")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mix/blend.rs"]
mod tests;
