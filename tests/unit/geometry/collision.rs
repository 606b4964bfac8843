use super::*;

fn body() -> CollisionBody {
    CollisionBody::new(Point::new(20.0, 0.0), 2.0)
}

#[test]
fn centroid_of_silhouette_collides() {
    let b = body();
    let c = b.body.centroid();
    assert!(b.contains(c));
    assert!(b.colliding([c]));
}

#[test]
fn far_point_does_not_collide() {
    let b = body();
    assert!(!b.colliding([Point::new(5000.0, -5000.0)]));
    assert!(!b.colliding([b.body.centroid(), Point::new(-1000.0, 1000.0)]));
}

#[test]
fn empty_point_set_is_never_contained() {
    assert!(!body().colliding(std::iter::empty()));
}

#[test]
fn concave_notch_between_legs_is_outside() {
    let b = CollisionBody::new(Point::ZERO, 1.0);
    // local (10, 170) sits left of the leg column, below the torso
    assert!(!b.contains(Point::new(10.0, 50.0 + 170.0)));
    assert!(b.contains(Point::new(50.0, 50.0 + 170.0)));
}

#[test]
fn head_circle_counts_as_inside() {
    let b = CollisionBody::new(Point::ZERO, 1.0);
    assert!(b.contains(Point::new(50.0, 5.0)));
    assert!(!b.body.contains(Point::new(50.0, 5.0)));
}

#[test]
fn for_canvas_scales_with_height() {
    let b = CollisionBody::for_canvas(Canvas::new(640, 560).unwrap());
    assert_eq!(b.circle.radius, 60.0);
    assert_eq!(b.body.origin, Point::new(20.0, 100.0));
}

#[test]
fn centroid_of_square_is_its_center() {
    let square = Polygon {
        origin: Point::new(10.0, 10.0),
        points: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ],
    };
    let c = square.centroid();
    assert!((c.x - 12.0).abs() < 1e-9 && (c.y - 12.0).abs() < 1e-9);
}
