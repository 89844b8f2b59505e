use super::*;
use crate::foundation::core::Point3;

fn two_devices() -> Vec<Device> {
    vec![
        Device::new(1, 0, Point3::default()),
        Device::new(2, 0, Point3::new(1.0, 0.0, 0.0)),
    ]
}

fn t(ms: i64) -> TimePoint {
    TimePoint::new(0, ms)
}

#[test]
fn builds_from_black_then_holds() {
    let white = Pixel::white();
    let mut fx = RampEffect::new(white, 1000, 5000);
    fx.patch_devices(&two_devices());

    fx.animate(t(10_000));
    assert_eq!(fx.render(), &[Pixel::black(); 2]);

    fx.animate(t(10_500));
    assert!((fx.render()[0].r() - 0.5).abs() < 1e-6);

    fx.animate(t(11_000));
    assert_eq!(fx.render(), &[white; 2]);

    fx.animate(t(14_000));
    assert_eq!(fx.render(), &[white; 2]);
}

#[test]
fn rewind_restarts_from_black() {
    let mut fx = RampEffect::new(Pixel::white(), 1000, 5000);
    fx.patch_devices(&two_devices());
    fx.animate(t(0));
    fx.animate(t(2000));
    assert_eq!(fx.render()[0], Pixel::white());

    fx.rewind();
    fx.animate(t(3000));
    assert_eq!(fx.render()[0], Pixel::black());
}

#[test]
fn exposes_cue_capability() {
    let mut fx = RampEffect::new(Pixel::white(), 10, 42);
    assert_eq!(fx.as_cue().map(|c| c.cue_duration_millis()), Some(42));
    assert!(fx.as_cue_mut().is_some());
}

#[test]
fn set_state_recolors_held_frame_on_next_animate() {
    let mut fx = RampEffect::new(Pixel::white(), 0, 5000);
    fx.patch_devices(&two_devices());
    fx.animate(t(0));
    assert_eq!(fx.render()[1], Pixel::white());

    let red = Pixel::new(1.0, 0.0, 0.0);
    fx.set_state(RemoteState::Ramp(RampState {
        color: red,
        build_millis: -1,
        duration_millis: 0,
    }))
    .unwrap();
    assert_eq!(fx.render()[1], Pixel::white());
    fx.animate(t(1));
    assert_eq!(fx.render()[1], red);
    assert_eq!(fx.cue_duration_millis(), 5000);
}

fn frames(fx: &mut RampEffect, round_trip: bool) -> Vec<Vec<Pixel>> {
    fx.patch_devices(&two_devices());
    [0, 100, 250, 400, 499, 500, 700, 1_000, 5_000]
        .into_iter()
        .map(|ms| {
            if round_trip {
                fx.set_state(fx.state()).unwrap();
            }
            fx.animate(t(ms));
            fx.render().to_vec()
        })
        .collect()
}

#[test]
fn round_trip_state_changes_nothing() {
    let color = Pixel::new(0.8, 0.4, 0.2);
    for (build, duration) in [(500, 2_000), (0, 2_000), (500, 0)] {
        let mut plain = RampEffect::new(color, build, duration);
        let mut echoed = RampEffect::new(color, build, duration);
        assert_eq!(frames(&mut echoed, true), frames(&mut plain, false));
        assert_eq!(echoed.cue_duration_millis(), plain.cue_duration_millis());
        assert_eq!(echoed.state(), plain.state());
    }
}

#[test]
fn extreme_scene_times_do_not_overflow() {
    let mut fx = RampEffect::new(Pixel::white(), 1000, 5000);
    fx.patch_devices(&two_devices());
    fx.animate(t(i64::MIN));
    assert_eq!(fx.render()[0], Pixel::black());
    fx.animate(t(i64::MAX));
    assert_eq!(fx.render()[0], Pixel::white());
}
