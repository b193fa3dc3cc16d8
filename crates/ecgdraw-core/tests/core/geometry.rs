use ecgdraw_core::geometry::{Point, Rectangle, OUTSIDE};
use proptest::prelude::*;

#[test]
fn test_check_point_reference_quadrants() {
    let r = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(r.check_point(75.0, 25.0, true, false), 1);
    assert_eq!(r.check_point(25.0, 75.0, true, false), 4);
}

#[test]
fn test_contains_point_edges_are_inclusive() {
    let r = Rectangle::new(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains_point(10.0, 10.0));
    assert!(r.contains_point(30.0, 30.0));
    assert!(!r.contains_point(30.01, 30.0));
    assert!(!r.contains_point(10.0, 9.99));
}

#[test]
fn test_negative_extent_is_never_contained() {
    // Mirrored floating containers: the raw interval is empty.
    let mirrored = Rectangle::floating(100.0, 0.0, -40.0, 50.0);
    for x in [60.0, 80.0, 100.0] {
        assert!(!mirrored.contains_point(x, 25.0));
        assert_eq!(mirrored.check_point(x, 25.0, true, false), OUTSIDE);
    }
}

#[test]
fn test_limit_action_point_leaves_vertical_unclamped() {
    let outer = Rectangle::new(0.0, 0.0, 50.0, 50.0);
    let inner = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    let action = inner.limit_action_point(&outer, Point::new(0.0, 1_000.0));
    assert_eq!(action.top, 1_000.0);
}

proptest! {
    #[test]
    fn prop_contains_point_matches_closed_interval(
        left in -1_000.0f64..1_000.0,
        top in -1_000.0f64..1_000.0,
        width in 0.001f64..1_000.0,
        height in 0.001f64..1_000.0,
        x in -3_000.0f64..3_000.0,
        y in -3_000.0f64..3_000.0,
    ) {
        let r = Rectangle::new(left, top, width, height);
        let expected = left <= x && x <= left + width && top <= y && y <= top + height;
        prop_assert_eq!(r.contains_point(x, y), expected);
    }

    #[test]
    fn prop_pixel_to_time_inverts_time_to_pixel(
        t in -1.0e6f64..1.0e6,
        length in prop_oneof![-1.0e4f64..-0.01, 0.01f64..1.0e4],
        width in 1.0f64..1.0e4,
    ) {
        let r = Rectangle::new(0.0, 0.0, width, 10.0);
        let back = r.pixel_to_time(r.time_to_pixel(t, length), length);
        prop_assert!((back - t).abs() <= 1e-9 * t.abs().max(1.0));
    }

    #[test]
    fn prop_contained_points_get_a_quadrant(
        x in 0.0f64..=100.0,
        y in 0.0f64..=100.0,
    ) {
        let r = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let code = r.check_point(x, y, true, false);
        prop_assert!((1..=4).contains(&code));
    }

    #[test]
    fn prop_limit_action_point_result_is_inside(
        dx in -500i32..500,
        left in 0u32..50,
    ) {
        let (dx, left) = (f64::from(dx), f64::from(left));
        let outer = Rectangle::new(0.0, 0.0, 200.0, 10.0);
        let inner = Rectangle::new(left, 0.0, 40.0, 10.0);
        let clamped = inner.limit_action_point(&outer, Point::new(dx, 0.0));
        prop_assert!(inner.inside_limit(&outer, clamped.left));
    }
}
