use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CanvasError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CanvasError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        CanvasError::export("x")
            .to_string()
            .contains("export error:")
    );
    assert_eq!(
        CanvasError::NotFound(ImageId(7)).to_string(),
        "image not found: image-7"
    );
}

#[test]
fn not_found_is_the_only_benign_variant() {
    assert!(CanvasError::NotFound(ImageId(1)).is_not_found());
    assert!(!CanvasError::decode("bad").is_not_found());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CanvasError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
