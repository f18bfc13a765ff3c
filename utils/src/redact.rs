//! Keeps access tokens out of log output.

/// Mask an access token of the form `name:secret`, keeping only the name.
///
/// Tokens without a `:` are masked entirely.
pub fn redact_token(token: &str) -> String {
    match token.split_once(':') {
        Some((name, _)) => format!("{name}:***"),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_token_name() {
        assert_eq!(redact_token("client:0f9a8b"), "client:***");
    }

    #[test]
    fn masks_opaque_token() {
        assert_eq!(redact_token("0f9a8b"), "***");
    }
}
