//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a package file stem (name-version-release, no suffix)
    pub fn package_stem() -> impl Strategy<Value = String> {
        ("[a-z][a-z0-9-]{0,20}", 0u32..50, 1u32..20)
            .prop_map(|(name, version, release)| format!("{name}-{version}.0-{release}"))
    }

    /// Generate a repository baseurl
    pub fn baseurl() -> impl Strategy<Value = String> {
        (
            prop_oneof![
                Just("http".to_string()),
                Just("https".to_string()),
                Just("file".to_string())
            ],
            "[a-z]{3,10}",
            "[a-z0-9-]{1,20}",
        )
            .prop_map(|(scheme, host, path)| format!("{scheme}://{host}/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_stem_generator(stem in package_stem()) {
            prop_assert!(!stem.is_empty());
            prop_assert!(!stem.ends_with(".rpm"));
            prop_assert!(stem.contains('-'));
        }

        #[test]
        fn test_baseurl_generator(url in baseurl()) {
            prop_assert!(url.contains("://"));
            let (_, rest) = url.split_once("://").unwrap();
            prop_assert!(rest.contains('/'));
        }
    }
}
