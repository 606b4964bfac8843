use super::*;
use crate::pose::{BodyPart, Keypoint};

#[test]
fn alpha_scope_multiplies_and_restores() {
    let mut s = RecordingSurface::new(Canvas::new(10, 10).unwrap());
    s.set_global_alpha(0.5);
    {
        let mut scope = AlphaScope::new(&mut s, 0.5);
        scope.surface().fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        {
            let mut inner = AlphaScope::new(scope.surface(), 0.5);
            inner
                .surface()
                .fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        }
        assert_eq!(scope.surface().global_alpha(), 0.25);
    }
    assert_eq!(s.global_alpha(), 0.5);
    let alphas: Vec<f64> = s.commands().iter().map(|c| c.alpha).collect();
    assert_eq!(alphas, vec![0.25, 0.125]);
}

#[test]
fn alpha_scope_clamps_opacity() {
    let mut s = RecordingSurface::new(Canvas::new(4, 4).unwrap());
    {
        let mut scope = AlphaScope::new(&mut s, 3.0);
        assert_eq!(scope.surface().global_alpha(), 1.0);
    }
    assert_eq!(s.global_alpha(), 1.0);
}

#[test]
fn draw_keypoints_skips_low_confidence() {
    let mut s = RecordingSurface::new(Canvas::new(4, 4).unwrap());
    let kps = [
        Keypoint::new(BodyPart::Nose, 1.0, 1.0, 0.9),
        Keypoint::new(BodyPart::LeftEye, 2.0, 2.0, 0.2),
    ];
    draw_keypoints(&mut s, &kps, 0.6);
    assert_eq!(s.commands().len(), 1);
}
