//! Version info for the homework bot

/// Compile-time version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// "homework-bot 0.1.0"
pub fn version_line() -> String {
    format!("{} {}", NAME, VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        assert_eq!(version_line(), format!("homework-bot {}", VERSION));
        assert!(!VERSION.is_empty());
    }
}
