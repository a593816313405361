use crate::{AnimatedValue, AnimationError};

/// Maps an elapsed fraction and two keyframe values to the current value.
pub type EasingFn = fn(f32, AnimatedValue, AnimatedValue) -> Result<AnimatedValue, AnimationError>;

/// Constant-speed interpolation, component-wise for positions.
///
/// The progression is clamped to `0.0..=1.0` before use. Mixing a scalar
/// with a position fails with [`AnimationError::UnsupportedEasingType`].
pub fn linear(
    progression: f32,
    start: AnimatedValue,
    end: AnimatedValue,
) -> Result<AnimatedValue, AnimationError> {
    let t = progression.clamp(0.0, 1.0);
    match (start, end) {
        (AnimatedValue::Scalar(from), AnimatedValue::Scalar(to)) => {
            Ok(AnimatedValue::Scalar(from + (to - from) * t))
        }
        (AnimatedValue::Position(from), AnimatedValue::Position(to)) => {
            Ok(AnimatedValue::Position(from.lerp(to, t)))
        }
        _ => Err(AnimationError::UnsupportedEasingType {
            start: start.kind(),
            end: end.kind(),
        }),
    }
}

/// Decelerating interpolation: fast at the start, settling into the end value.
pub fn ease_out_quad(
    progression: f32,
    start: AnimatedValue,
    end: AnimatedValue,
) -> Result<AnimatedValue, AnimationError> {
    let t = progression.clamp(0.0, 1.0);
    let remaining = 1.0 - t;
    linear(1.0 - remaining * remaining, start, end)
}
