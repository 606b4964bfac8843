use super::*;

#[test]
fn oversized_canvas_is_rejected() {
    assert!(CpuSurface::new(Canvas::new(70_000, 10).unwrap()).is_err());
}

#[test]
fn cleared_surface_reads_back_clear_color() {
    let mut s = CpuSurface::new(Canvas::new(8, 8).unwrap()).unwrap();
    s.clear(Color::rgb(2, 63, 146));
    let f = s.snapshot().unwrap();
    assert_eq!(f.data().len(), 8 * 8 * 4);
    assert_eq!(f.pixel(4, 4), Some(Color::rgb(2, 63, 146)));
}

#[test]
fn fill_rect_covers_interior_pixels() {
    let mut s = CpuSurface::new(Canvas::new(16, 16).unwrap()).unwrap();
    s.clear(Color::BLACK);
    s.fill_rect(Rect::new(4.0, 4.0, 12.0, 12.0), Color::WHITE);
    let f = s.snapshot().unwrap();
    assert_eq!(f.pixel(8, 8), Some(Color::WHITE));
    assert_eq!(f.pixel(1, 1), Some(Color::BLACK));
}

#[test]
fn zero_alpha_draws_nothing() {
    let mut s = CpuSurface::new(Canvas::new(8, 8).unwrap()).unwrap();
    s.clear(Color::BLACK);
    s.set_global_alpha(0.0);
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::WHITE);
    assert_eq!(s.snapshot().unwrap().pixel(3, 3), Some(Color::BLACK));
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = [64u8, 32, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [128, 64, 0, 128]);
}
