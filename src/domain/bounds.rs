use crate::error::{InstallError, Result};
use semver::Version;

/// Inclusive version window applied before grouping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionBounds {
    pub min: Option<Version>,
    pub max: Option<Version>,
}

impl VersionBounds {
    /// Create bounds from already-parsed versions
    pub fn new(min: Option<Version>, max: Option<Version>) -> Self {
        VersionBounds { min, max }
    }

    /// Parse bounds from the strings given on the command line or in config
    ///
    /// Bound values must be full `X.Y.Z` versions; anything else is a
    /// fatal version error rather than a silently dropped tag.
    pub fn parse(min: Option<&str>, max: Option<&str>) -> Result<Self> {
        let min = min
            .map(Version::parse)
            .transpose()
            .map_err(|e| InstallError::version(format!("Invalid minimum version: {}", e)))?;

        let max = max
            .map(Version::parse)
            .transpose()
            .map_err(|e| InstallError::version(format!("Invalid maximum version: {}", e)))?;

        Ok(VersionBounds { min, max })
    }

    /// Check whether a version falls inside the window (inclusive ends)
    pub fn contains(&self, version: &Version) -> bool {
        if let Some(min) = &self.min {
            if version < min {
                return false;
            }
        }
        if let Some(max) = &self.max {
            if version > max {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: Option<&str>, max: Option<&str>) -> VersionBounds {
        VersionBounds::parse(min, max).unwrap()
    }

    #[test]
    fn test_unbounded_contains_everything() {
        let b = bounds(None, None);
        assert!(b.contains(&Version::new(0, 1, 0)));
        assert!(b.contains(&Version::new(999, 0, 0)));
    }

    #[test]
    fn test_minimum_is_inclusive() {
        let b = bounds(Some("3.0.0"), None);
        assert!(!b.contains(&Version::new(2, 7, 18)));
        assert!(b.contains(&Version::new(3, 0, 0)));
        assert!(b.contains(&Version::new(3, 0, 1)));
    }

    #[test]
    fn test_maximum_is_inclusive() {
        let b = bounds(None, Some("3.9.0"));
        assert!(b.contains(&Version::new(3, 9, 0)));
        assert!(!b.contains(&Version::new(3, 9, 1)));
        assert!(!b.contains(&Version::new(3, 10, 0)));
    }

    #[test]
    fn test_both_bounds() {
        let b = bounds(Some("3.6.0"), Some("3.8.99"));
        assert!(!b.contains(&Version::new(3, 5, 10)));
        assert!(b.contains(&Version::new(3, 6, 0)));
        assert!(b.contains(&Version::new(3, 8, 19)));
        assert!(!b.contains(&Version::new(3, 9, 0)));
    }

    #[test]
    fn test_inverted_bounds_contain_nothing() {
        let b = bounds(Some("3.9.0"), Some("3.6.0"));
        assert!(!b.contains(&Version::new(3, 7, 0)));
        assert!(!b.contains(&Version::new(3, 9, 0)));
    }

    #[test]
    fn test_parse_rejects_partial_version() {
        assert!(VersionBounds::parse(Some("3.9"), None).is_err());
        assert!(VersionBounds::parse(None, Some("not-a-version")).is_err());
    }

    #[test]
    fn test_parse_error_names_which_bound() {
        let err = VersionBounds::parse(Some("bad"), None).unwrap_err();
        assert!(err.to_string().contains("minimum"));

        let err = VersionBounds::parse(None, Some("bad")).unwrap_err();
        assert!(err.to_string().contains("maximum"));
    }
}
