use super::*;

#[test]
fn interpolate_hits_corners() {
    let s = TriangleSignal::new(0.0, 1.0, 1000);
    assert_eq!(s.interpolate(0.0), 0.0);
    assert_eq!(s.interpolate(0.5), 1.0);
    assert_eq!(s.interpolate(1.0), 0.0);
    assert_eq!(s.interpolate(0.25), 0.5);
    assert_eq!(s.interpolate(0.75), 0.5);
}

#[test]
fn value_at_wraps_by_period() {
    let s = TriangleSignal::new(0.0, 1.0, 1000);
    assert_eq!(s.value_at(TimePoint::new(0, 500)), 1.0);
    assert_eq!(s.value_at(TimePoint::new(0, 1500)), 1.0);
    assert_eq!(s.value_at(TimePoint::new(0, 2000)), 0.0);
}

#[test]
fn zero_period_is_constant_start() {
    let s = TriangleSignal::new(0.3, 1.0, 0);
    assert_eq!(s.value_at(TimePoint::new(0, 12345)), 0.3);
}
