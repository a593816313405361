use std::time::Duration;

use glam::Vec2;
use tilt_2048_animation::{
    ease_out_quad, AnimatedProperty, AnimatedValue, AnimationError, AnimationStep,
};

const T0: Duration = Duration::from_secs(60);

fn ten_over_one_second() -> AnimatedProperty {
    AnimatedProperty::new(
        AnimationStep::new(AnimatedValue::Scalar(0.0), T0),
        AnimationStep::new(AnimatedValue::Scalar(10.0), T0 + Duration::from_millis(1_000)),
    )
}

#[test]
fn linear_scalar_samples_match_expectation() {
    let property = ten_over_one_second();

    assert_eq!(
        property.value_at(T0 + Duration::from_millis(500)),
        Ok(AnimatedValue::Scalar(5.0))
    );
    assert_eq!(
        property.value_at(T0 - Duration::from_millis(100)),
        Ok(AnimatedValue::Scalar(0.0))
    );
    assert_eq!(
        property.value_at(T0 + Duration::from_millis(5_000)),
        Ok(AnimatedValue::Scalar(10.0))
    );
}

#[test]
fn repeated_sampling_is_idempotent_after_expiry() {
    let property = ten_over_one_second();
    let late = T0 + Duration::from_secs(30);

    let first = property.value_at(late);
    let second = property.value_at(late);
    assert_eq!(first, second);
    assert!(property.is_finished(late));
}

#[test]
fn position_tween_moves_between_cells() {
    let property = AnimatedProperty::tween(
        AnimatedValue::Position(Vec2::new(0.0, 1.0)),
        AnimatedValue::Position(Vec2::new(3.0, 1.0)),
        T0,
        Duration::from_millis(100),
    );

    let halfway = property
        .value_at(T0 + Duration::from_millis(50))
        .expect("positions ease")
        .as_position()
        .expect("position value");
    assert!((halfway.x - 1.5).abs() < 1e-5);
    assert!((halfway.y - 1.0).abs() < 1e-5);
}

#[test]
fn custom_easing_is_used_for_sampling() {
    let property = AnimatedProperty::with_easing(
        AnimationStep::new(AnimatedValue::Scalar(0.0), T0),
        AnimationStep::new(AnimatedValue::Scalar(1.0), T0 + Duration::from_millis(100)),
        ease_out_quad,
    );

    let value = property
        .value_at(T0 + Duration::from_millis(50))
        .expect("scalars ease")
        .as_scalar()
        .expect("scalar value");
    assert!((value - 0.75).abs() < 1e-5);
}

#[test]
fn mismatched_keyframes_report_unsupported_type() {
    let property = AnimatedProperty::new(
        AnimationStep::new(AnimatedValue::Scalar(0.0), T0),
        AnimationStep::new(AnimatedValue::Position(Vec2::ONE), T0 + Duration::from_millis(10)),
    );

    assert!(matches!(
        property.value_at(T0),
        Err(AnimationError::UnsupportedEasingType { .. })
    ));
}
