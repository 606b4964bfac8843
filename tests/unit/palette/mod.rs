use super::*;

fn striped() -> Frame {
    // 10x10: 6 red columns, 3 blue, 1 green
    let mut f = Frame::blank(10, 10);
    for y in 0..10 {
        for x in 0..10 {
            let c = match x {
                0..=5 => Color::rgb(250, 0, 0),
                6..=8 => Color::rgb(0, 0, 250),
                _ => Color::rgb(0, 250, 0),
            };
            f.set_pixel(x, y, c);
        }
    }
    f
}

#[test]
fn prominent_must_be_in_palette() {
    let p = vec![Color::BLACK, Color::WHITE];
    assert_eq!(
        ColorSample::new(p.clone(), Color::WHITE)
            .unwrap()
            .prominent_index(),
        1
    );
    assert!(ColorSample::new(p.clone(), Color::rgb(1, 2, 3)).is_err());
    assert!(ColorSample::with_index(p, 2).is_err());
}

#[test]
fn histogram_orders_by_population() {
    let s = HistogramSampler::default()
        .sample(&striped(), &BoundingBox::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    assert_eq!(
        s.palette(),
        &[
            Color::rgb(250, 0, 0),
            Color::rgb(0, 0, 250),
            Color::rgb(0, 250, 0)
        ]
    );
    assert_eq!(s.prominent(), Color::rgb(250, 0, 0));
}

#[test]
fn region_limits_sampling_and_inverted_boxes_work() {
    let s = HistogramSampler::default()
        .sample(&striped(), &BoundingBox::new(10.0, 10.0, 6.0, 0.0))
        .unwrap();
    assert_eq!(s.prominent(), Color::rgb(0, 0, 250));
    assert_eq!(s.palette().len(), 2);
}

#[test]
fn palette_is_capped() {
    let mut f = Frame::blank(16, 1);
    for x in 0..16u32 {
        f.set_pixel(x, 0, Color::rgb((x * 16) as u8, 0, 0));
    }
    let s = HistogramSampler::default()
        .sample(&f, &BoundingBox::new(0.0, 0.0, 16.0, 1.0))
        .unwrap();
    assert_eq!(s.palette().len(), 7);
}

#[test]
fn regions_outside_the_frame_sample_the_nearest_edge() {
    let sampler = HistogramSampler::default();
    let above = sampler
        .sample(&striped(), &BoundingBox::new(0.0, -20.0, 4.0, -5.0))
        .unwrap();
    assert_eq!(above.palette(), &[Color::rgb(250, 0, 0)]);

    let right = sampler
        .sample(&striped(), &BoundingBox::new(50.0, 50.0, 60.0, 60.0))
        .unwrap();
    assert_eq!(right.prominent(), Color::rgb(0, 250, 0));

    let zero_width = sampler
        .sample(&striped(), &BoundingBox::new(7.0, 2.0, 7.0, 8.0))
        .unwrap();
    assert_eq!(zero_width.prominent(), Color::rgb(0, 0, 250));
}

#[test]
fn fully_transparent_frames_yield_a_transparent_palette() {
    let sampler = HistogramSampler::default();
    let s = sampler
        .sample(&Frame::blank(4, 4), &BoundingBox::new(0.0, 0.0, 4.0, 4.0))
        .unwrap();
    assert_eq!(s.palette(), &[Color::TRANSPARENT]);
    assert_eq!(s.prominent_index(), 0);

    let empty = sampler
        .sample(&Frame::blank(0, 0), &BoundingBox::new(-3.0, -3.0, 3.0, 3.0))
        .unwrap();
    assert_eq!(empty.prominent(), Color::TRANSPARENT);
}

#[test]
fn sample_regions_keeps_order() {
    let frame = striped();
    let boxes = [
        BoundingBox::new(0.0, 0.0, 2.0, 2.0),
        BoundingBox::new(6.0, 0.0, 8.0, 2.0),
        BoundingBox::new(9.0, 0.0, 10.0, 2.0),
        BoundingBox::new(0.0, 5.0, 2.0, 7.0),
        BoundingBox::new(6.0, 5.0, 8.0, 7.0),
        BoundingBox::new(9.0, 5.0, 10.0, 7.0),
    ];
    let samples = sample_regions(&HistogramSampler::default(), &frame, &boxes).unwrap();
    let prominent: Vec<Color> = samples.iter().map(ColorSample::prominent).collect();
    assert_eq!(prominent[0], Color::rgb(250, 0, 0));
    assert_eq!(prominent[1], Color::rgb(0, 0, 250));
    assert_eq!(prominent[2], Color::rgb(0, 250, 0));
}

#[test]
fn swatch_json_requires_six_hex_colours() {
    let ok = r##"{"colors":["#000000","#ffffff","#ff0000","#00ff00","#0000ff","#023f92"]}"##;
    let s = Swatch::from_json(ok).unwrap();
    assert_eq!(s.get(BodyRegion::Feet), Color::rgb(2, 63, 146));
    assert_eq!(s.to_json().unwrap(), ok);
    assert_eq!(s.hex()[1], "#ffffff");

    let short = r##"{"colors":["#000000","#ffffff"]}"##;
    assert!(Swatch::from_json(short).is_err());
    let not_hex = r##"{"colors":["nope","#ffffff","#ff0000","#00ff00","#0000ff","#023f92"]}"##;
    assert!(Swatch::from_json(not_hex).is_err());
}

#[test]
fn swatch_display_lists_hex_in_region_order() {
    let s = Swatch::new([Color::BLACK; 6]);
    assert_eq!(s.to_string(), "#000000 #000000 #000000 #000000 #000000 #000000");
}
