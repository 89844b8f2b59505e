use super::*;
use crate::{
    effects::monochrome::MonochromeEffect,
    foundation::{core::Point3, pixel::Pixel},
    mix::layer::Layer,
    patch::device::Device,
    scene::{shuffler::DairyShuffler, timing::FadeTiming},
    effects::ramp::RampEffect,
};

fn two_device_patch() -> Patch {
    Patch::new(vec![
        Device::new(10, 0, Point3::new(0.0, 0.0, 0.0)),
        Device::new(11, 0, Point3::new(1.0, 0.0, 0.0)),
    ])
    .unwrap()
}

fn red_and_blue() -> Mixer {
    Mixer::new(vec![
        Layer::new("red", Box::new(MonochromeEffect::new(Pixel::new(1.0, 0.0, 0.0)))).into(),
        Layer::new("blue", Box::new(MonochromeEffect::new(Pixel::new(0.0, 0.0, 1.0))))
            .with_level(0.5)
            .into(),
    ])
}

#[test]
fn tick_routes_one_color_per_device() {
    let mut show = Show::new(red_and_blue(), two_device_patch());
    let frame = show.tick(TimePoint::new(0, 0)).unwrap();
    assert_eq!(frame.len(), 2);
    assert_eq!(frame[0].address, 10);
    assert_eq!(frame[1].address, 11);
    assert_eq!(frame[0].color, Pixel::new(1.0, 0.0, 0.5));
}

#[test]
fn queued_commands_land_on_the_next_tick() {
    let mut show = Show::new(red_and_blue(), two_device_patch());
    let handle = show.control();
    handle
        .send(Command {
            target: Target::Layer(0),
            state: RemoteState::Color(Pixel::new(0.0, 1.0, 0.0)),
        })
        .unwrap();
    assert_eq!(
        show.state_of(Target::Layer(0)),
        Some(RemoteState::Color(Pixel::new(1.0, 0.0, 0.0)))
    );

    let frame = show.tick(TimePoint::new(1, 33)).unwrap();
    assert_eq!(frame[0].color, Pixel::new(0.0, 1.0, 0.5));
    assert_eq!(
        handle.snapshot(Target::Layer(0)),
        Some(RemoteState::Color(Pixel::new(0.0, 1.0, 0.0)))
    );
}

#[test]
fn rejected_commands_do_not_abort_the_frame() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut show = Show::new(red_and_blue(), two_device_patch());
    let handle = show.control();
    handle
        .send(Command {
            target: Target::Layer(7),
            state: RemoteState::Color(Pixel::white()),
        })
        .unwrap();
    handle
        .send(Command {
            target: Target::Layer(1),
            state: RemoteState::Shuffler(crate::scene::shuffler::ShufflerState {
                enabled: false,
                cue_duration_millis: 10,
            }),
        })
        .unwrap();
    let frame = show.tick(TimePoint::new(0, 0)).unwrap();
    assert_eq!(frame[1].color, Pixel::new(1.0, 0.0, 0.5));
}

#[test]
fn nested_mixers_have_no_remote_state() {
    let inner = Mixer::new(vec![
        Layer::new("inner", Box::new(MonochromeEffect::new(Pixel::white()))).into(),
    ]);
    let mut show = Show::new(Mixer::new(vec![inner.into()]), two_device_patch());
    let err = show
        .apply(&Command {
            target: Target::Layer(0),
            state: RemoteState::Color(Pixel::black()),
        })
        .unwrap_err();
    assert!(matches!(err, LumaError::State(_)));
    assert_eq!(show.state_of(Target::Layer(0)), None);
}

#[test]
fn unknown_animator_is_a_state_error() {
    let mut show = Show::new(red_and_blue(), two_device_patch());
    let err = show
        .apply(&Command {
            target: Target::Animator(AnimatorId(3)),
            state: RemoteState::Color(Pixel::black()),
        })
        .unwrap_err();
    assert!(matches!(err, LumaError::State(_)));
}

#[test]
fn shuffler_state_is_published_and_remotely_settable() {
    let mut mixer = Mixer::new(vec![
        Layer::new("woven", Box::new(RampEffect::new(Pixel::white(), 100, 1_000))).into(),
        Layer::new("a", Box::new(MonochromeEffect::new(Pixel::white()))).into(),
        Layer::new("b", Box::new(MonochromeEffect::new(Pixel::white()))).into(),
    ]);
    let timing = Some(FadeTiming::new(0.5, 0.5));
    let id = DairyShuffler::subscribe(&mut mixer, 0, 1, 2, vec![None, timing, timing]).unwrap();
    let mut show = Show::new(mixer, two_device_patch()).with_shuffler(Some(id));
    let handle = show.control();
    assert!(handle.targets().contains(&Target::Animator(id)));

    handle
        .send(Command {
            target: Target::Animator(id),
            state: RemoteState::Shuffler(crate::scene::shuffler::ShufflerState {
                enabled: false,
                cue_duration_millis: 1_000,
            }),
        })
        .unwrap();
    show.tick(TimePoint::new(0, 0)).unwrap();
    match handle.snapshot(Target::Animator(id)) {
        Some(RemoteState::Shuffler(state)) => assert!(!state.enabled),
        other => panic!("unexpected snapshot {other:?}"),
    }
}

#[test]
fn repatch_resizes_the_frame() {
    let mut show = Show::new(red_and_blue(), two_device_patch());
    show.repatch(Patch::new(vec![Device::new(1, 0, Point3::default())]).unwrap());
    let frame = show.tick(TimePoint::new(0, 0)).unwrap();
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0].address, 1);
}
