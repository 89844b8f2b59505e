use super::*;
use crate::effects::monochrome::MonochromeEffect;

fn solid(name: &str) -> Layer {
    Layer::new(name, Box::new(MonochromeEffect::new(Pixel::white())))
}

#[test]
fn empty_name_becomes_untitled() {
    assert_eq!(solid("").name(), "Untitled");
    assert_eq!(solid("  ").name(), "Untitled");
    assert_eq!(solid("wash").name(), "wash");
}

#[test]
fn level_defaults_to_one_and_is_clamped() {
    let mut l = solid("a");
    assert_eq!(l.level(), 1.0);
    l.set_level(1.5);
    assert_eq!(l.level(), 1.0);
    l.set_level(-0.5);
    assert_eq!(l.level(), 0.0);
    l.set_level(f64::NAN);
    assert_eq!(l.level(), 0.0);
    assert_eq!(solid("b").with_level(0.25).level(), 0.25);
}

#[test]
fn state_is_delegated_to_the_effect() {
    let mut l = solid("a");
    assert_eq!(l.state_class(), StateClass::Color);
    l.set_state(RemoteState::Color(Pixel::black())).unwrap();
    assert_eq!(l.state(), RemoteState::Color(Pixel::black()));
}
