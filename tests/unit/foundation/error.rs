use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BoothError::capture("x")
            .to_string()
            .contains("capture error:")
    );
    assert!(BoothError::pose("x").to_string().contains("pose error:"));
    assert!(
        BoothError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn missing_landmark_names_the_part() {
    let err = BoothError::missing(BodyPart::LeftAnkle);
    assert_eq!(err.to_string(), "missing landmark: leftAnkle");
    assert!(err.is_transient());
}

#[test]
fn validation_is_not_transient() {
    assert!(!BoothError::validation("bad config").is_transient());
    assert!(BoothError::capture("camera gone").is_transient());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
