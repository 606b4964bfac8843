use super::*;

fn surface() -> RecordingSurface {
    RecordingSurface::new(Canvas::new(32, 32).unwrap())
}

#[test]
fn save_restore_round_trips_alpha_and_transform() {
    let mut s = surface();
    s.save();
    s.set_global_alpha(0.3);
    s.transform(Affine::translate((5.0, 0.0)));
    s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
    s.restore();
    s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);

    let cmds = s.commands();
    assert_eq!(cmds[0].alpha, 0.3);
    assert_eq!(cmds[0].transform, Affine::translate((5.0, 0.0)));
    assert_eq!(cmds[1].alpha, 1.0);
    assert_eq!(cmds[1].transform, Affine::IDENTITY);
    assert_eq!(s.save_depth(), 0);
}

#[test]
fn unbalanced_restore_is_ignored() {
    let mut s = surface();
    s.set_global_alpha(0.4);
    s.restore();
    assert_eq!(s.global_alpha(), 0.4);
}

#[test]
fn take_drains_and_count_filters() {
    let mut s = surface();
    s.stroke_line(Point::ZERO, Point::new(3.0, 4.0), Color::WHITE, 1.0);
    s.fill_circle(Point::ZERO, 2.0, Color::BLACK);
    assert_eq!(s.count(|op| matches!(op, DrawOp::Line { .. })), 1);
    assert_eq!(s.take().len(), 2);
    assert!(s.commands().is_empty());
}
