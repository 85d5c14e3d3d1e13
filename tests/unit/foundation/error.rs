use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        QuotegenxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(QuotegenxError::render("x").to_string().contains("render error:"));
    assert!(QuotegenxError::font("x").to_string().contains("font error:"));
    assert!(QuotegenxError::export("x").to_string().contains("export error:"));
    assert!(
        QuotegenxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = QuotegenxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
