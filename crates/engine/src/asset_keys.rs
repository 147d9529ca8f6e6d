use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetKeyError {
    #[error("asset key must not be empty")]
    Empty,
    #[error("asset key must not start with '/'")]
    LeadingSlash,
    #[error("asset key must not contain '\\\\'")]
    Backslash,
    #[error("asset key must not contain a '..' component")]
    ParentTraversal,
    #[error("asset key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Asset keys are relative paths under the assets directory. Spaces are
/// allowed because the shipped art uses them ("mug shot.png").
pub(crate) fn validate_asset_key(key: &str) -> Result<(), AssetKeyError> {
    if key.is_empty() {
        return Err(AssetKeyError::Empty);
    }
    if key.starts_with('/') {
        return Err(AssetKeyError::LeadingSlash);
    }
    if key.contains('\\') {
        return Err(AssetKeyError::Backslash);
    }
    if key.split('/').any(|component| component == "..") {
        return Err(AssetKeyError::ParentTraversal);
    }
    for ch in key.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '/' | '-' | '.' | ' ') {
            continue;
        }
        return Err(AssetKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_asset_key, AssetKeyError};

    #[test]
    fn accepts_valid_keys() {
        for key in [
            "graphics/elevator.png",
            "graphics/mug shot.png",
            "warioware font.otf/warioware-inc-mega-microgame-big.otf",
        ] {
            assert!(validate_asset_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_invalid_keys() {
        for key in ["", "/a", "..", "a/../b", r"a\b", "a:b", "a*b"] {
            assert!(validate_asset_key(key).is_err(), "key={key}");
        }
    }

    #[test]
    fn dotted_file_names_are_not_traversal() {
        assert!(validate_asset_key("a..b.png").is_ok());
        assert_eq!(
            validate_asset_key("graphics/../x.png"),
            Err(AssetKeyError::ParentTraversal)
        );
    }
}
