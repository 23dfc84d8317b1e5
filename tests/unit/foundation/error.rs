use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CaptionError::invalid_configuration("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        CaptionError::malformed_transcript("x")
            .to_string()
            .contains("malformed transcript:")
    );
    assert!(
        CaptionError::transcription("x")
            .to_string()
            .contains("transcription error:")
    );
    assert!(
        CaptionError::composite("x")
            .to_string()
            .contains("composite error:")
    );
    assert!(
        CaptionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CaptionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
