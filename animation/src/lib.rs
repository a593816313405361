#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Time-keyed interpolation used to smooth tile transitions.
//!
//! An [`AnimatedProperty`] is a pure function of the sampling instant: it
//! holds two fixed [`AnimationStep`] keyframes and an easing function, and
//! never mutates when queried. Instants are expressed as [`Duration`] values
//! measured from an arbitrary clock origin chosen by the owner.

use std::time::Duration;

use glam::Vec2;
use thiserror::Error;

mod easing;

pub use easing::{ease_out_quad, linear, EasingFn};

/// Value carried by an animation keyframe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatedValue {
    /// Plain number such as a scale factor.
    Scalar(f32),
    /// Board position expressed in cell units.
    Position(Vec2),
}

impl AnimatedValue {
    /// Payload-free description of the value, used in error reports.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Position(_) => ValueKind::Position,
        }
    }

    /// Returns the number when the value is a scalar.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f32> {
        match *self {
            Self::Scalar(value) => Some(value),
            Self::Position(_) => None,
        }
    }

    /// Returns the position when the value is a position.
    #[must_use]
    pub const fn as_position(&self) -> Option<Vec2> {
        match *self {
            Self::Position(value) => Some(value),
            Self::Scalar(_) => None,
        }
    }
}

/// Discriminant of [`AnimatedValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Matches [`AnimatedValue::Scalar`].
    Scalar,
    /// Matches [`AnimatedValue::Position`].
    Position,
}

/// Errors raised while evaluating an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// The easing function cannot interpolate between the provided values.
    #[error("cannot ease from a {start:?} value to a {end:?} value")]
    UnsupportedEasingType {
        /// Kind of the start keyframe value.
        start: ValueKind,
        /// Kind of the end keyframe value.
        end: ValueKind,
    },
    /// A typed sampler was used on a property holding another kind of value.
    #[error("expected a {expected:?} animation, found a {found:?} one")]
    ValueKindMismatch {
        /// Kind requested by the caller.
        expected: ValueKind,
        /// Kind produced by the property.
        found: ValueKind,
    },
}

/// Single keyframe: a value reached at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationStep {
    value: AnimatedValue,
    time: Duration,
}

impl AnimationStep {
    /// Creates a keyframe.
    #[must_use]
    pub const fn new(value: AnimatedValue, time: Duration) -> Self {
        Self { value, time }
    }

    /// Value reached at the keyframe.
    #[must_use]
    pub const fn value(&self) -> AnimatedValue {
        self.value
    }

    /// Instant of the keyframe.
    #[must_use]
    pub const fn time(&self) -> Duration {
        self.time
    }
}

/// Interpolates between two keyframes as a function of time.
#[derive(Clone, Copy, Debug)]
pub struct AnimatedProperty {
    start: AnimationStep,
    end: AnimationStep,
    easing: EasingFn,
}

impl AnimatedProperty {
    /// Creates a linearly eased property.
    #[must_use]
    pub fn new(start: AnimationStep, end: AnimationStep) -> Self {
        Self::with_easing(start, end, linear)
    }

    /// Creates a property using a custom easing function.
    #[must_use]
    pub fn with_easing(start: AnimationStep, end: AnimationStep, easing: EasingFn) -> Self {
        Self { start, end, easing }
    }

    /// Convenience constructor for a tween of `duration` starting at `at`.
    #[must_use]
    pub fn tween(from: AnimatedValue, to: AnimatedValue, at: Duration, duration: Duration) -> Self {
        Self::new(
            AnimationStep::new(from, at),
            AnimationStep::new(to, at.saturating_add(duration)),
        )
    }

    /// First keyframe.
    #[must_use]
    pub const fn start(&self) -> AnimationStep {
        self.start
    }

    /// Last keyframe.
    #[must_use]
    pub const fn end(&self) -> AnimationStep {
        self.end
    }

    /// Time between the two keyframes. An end placed before the start counts as zero.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end.time.saturating_sub(self.start.time)
    }

    /// Fraction of the animation elapsed at `now`, clamped to `0.0..=1.0`.
    ///
    /// Sampling before the start yields `0.0`. Sampling at or after the end,
    /// or any sample at or after the start of a zero-length animation, yields
    /// `1.0`.
    #[must_use]
    pub fn progression(&self, now: Duration) -> f32 {
        if now < self.start.time {
            return 0.0;
        }

        let duration = self.duration();
        if now >= self.end.time || duration.is_zero() {
            return 1.0;
        }

        let elapsed = now - self.start.time;
        (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Interpolated value at `now`.
    pub fn value_at(&self, now: Duration) -> Result<AnimatedValue, AnimationError> {
        (self.easing)(self.progression(now), self.start.value, self.end.value)
    }

    /// Interpolated number at `now`.
    pub fn scalar_at(&self, now: Duration) -> Result<f32, AnimationError> {
        let value = self.value_at(now)?;
        value.as_scalar().ok_or(AnimationError::ValueKindMismatch {
            expected: ValueKind::Scalar,
            found: value.kind(),
        })
    }

    /// Interpolated position at `now`.
    pub fn position_at(&self, now: Duration) -> Result<Vec2, AnimationError> {
        let value = self.value_at(now)?;
        value.as_position().ok_or(AnimationError::ValueKindMismatch {
            expected: ValueKind::Position,
            found: value.kind(),
        })
    }

    /// Reports whether the animation has fully played out at `now`.
    #[must_use]
    pub fn is_finished(&self, now: Duration) -> bool {
        self.progression(now) >= 1.0
    }
}
