use super::*;
use crate::pose::Keypoint;

fn canvas() -> Canvas {
    Canvas::new(400, 400).unwrap()
}

#[test]
fn converges_on_landmarks() {
    let pose = Pose::new(
        BodyPart::OUTLINE
            .iter()
            .map(|&p| Keypoint::new(p, 100.0, 300.0, 1.0))
            .collect(),
    );
    let mut f = ShapeFollower::new(canvas(), SpringParams::default(), 1);
    for _ in 0..300 {
        f.update(16.0, Some(&pose), canvas());
    }
    for p in f.points() {
        assert!((p - Point::new(100.0, 300.0)).hypot() < 1.0, "{p:?}");
    }
}

#[test]
fn idle_circle_stays_near_center_without_pose() {
    let mut f = ShapeFollower::new(canvas(), SpringParams::default(), 9);
    for _ in 0..120 {
        f.update(16.0, None, canvas());
    }
    let r_max = 100.0 * (1.0 + SpringParams::default().wobble) + 10.0;
    for p in f.points() {
        let d = (p - canvas().center()).hypot();
        assert!(d < r_max, "{d}");
        assert!(d > 50.0, "{d}");
    }
}

#[test]
fn zero_delta_does_not_move_nodes() {
    let mut f = ShapeFollower::new(canvas(), SpringParams::default(), 3);
    let before: Vec<_> = f.points().collect();
    f.update(0.0, None, canvas());
    assert_eq!(before, f.points().collect::<Vec<_>>());
}

#[test]
fn non_finite_or_huge_deltas_stay_bounded() {
    let mut f = ShapeFollower::new(canvas(), SpringParams::default(), 3);
    let before: Vec<_> = f.points().collect();
    f.update(f64::INFINITY, None, canvas());
    f.update(f64::NAN, None, canvas());
    assert_eq!(before, f.points().collect::<Vec<_>>());

    f.update(1.0e12, None, canvas());
    for p in f.points() {
        assert!(p.is_finite(), "{p:?}");
        assert!((p - canvas().center()).hypot() < 200.0, "{p:?}");
    }
}

#[test]
fn smooth_path_is_closed_with_one_quad_per_point() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ];
    let path = smooth_closed_path(&pts);
    let quads = path
        .elements()
        .iter()
        .filter(|e| matches!(e, kurbo::PathEl::QuadTo(..)))
        .count();
    assert_eq!(quads, 3);
    assert!(matches!(
        path.elements().last(),
        Some(kurbo::PathEl::ClosePath)
    ));
    assert!(smooth_closed_path(&[]).elements().is_empty());
}
