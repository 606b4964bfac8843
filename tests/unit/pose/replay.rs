use super::*;
use crate::pose::BodyPart;

#[test]
fn single_take_json_loops_forever() {
    let json = r#"[{"part":"nose","position":{"x":1.0,"y":2.0},"score":0.9}]"#;
    let mut est = ReplayEstimator::from_json(json).unwrap();
    let frame = Frame::blank(4, 4);
    for _ in 0..3 {
        let take = pollster::block_on(est.estimate(&frame)).unwrap();
        assert_eq!(take.len(), 1);
        assert_eq!(take[0].part, BodyPart::Nose);
    }
}

#[test]
fn multiple_takes_play_in_order() {
    let json = r#"[[], [{"part":"leftEye","position":{"x":0.0,"y":0.0},"score":0.7}]]"#;
    let mut est = ReplayEstimator::from_json(json).unwrap();
    let frame = Frame::blank(4, 4);
    assert!(pollster::block_on(est.estimate(&frame)).unwrap().is_empty());
    assert_eq!(pollster::block_on(est.estimate(&frame)).unwrap().len(), 1);
    assert!(pollster::block_on(est.estimate(&frame)).unwrap().is_empty());
}

#[test]
fn empty_or_malformed_input_is_rejected() {
    assert!(ReplayEstimator::new(Vec::new()).is_err());
    assert!(matches!(
        ReplayEstimator::from_json("{"),
        Err(BoothError::Serde(_))
    ));
}
