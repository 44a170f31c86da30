use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// A git tag whose label parses as a release version
///
/// Keeps the raw tag label (the string handed to `git checkout`) next to
/// the parsed version used for filtering, grouping, and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub tag: String,
    pub version: Version,
}

impl ReleaseTag {
    /// Parse a tag label into a release (e.g., "v3.12.1" -> 3.12.1)
    ///
    /// Strips at most one leading marker character ('v' or 'V') before
    /// handing the rest to the semver parser. Labels that do not parse
    /// yield `None`; CPython pre-release tags such as "v3.12.0a1" and
    /// "v3.12.0rc2" fall out here.
    pub fn parse(tag: &str) -> Option<Self> {
        let bare = tag
            .strip_prefix('v')
            .or_else(|| tag.strip_prefix('V'))
            .unwrap_or(tag);

        let version = Version::parse(bare).ok()?;

        Some(ReleaseTag {
            tag: tag.to_string(),
            version,
        })
    }

    /// The (major, minor) pair identifying this release's minor line
    pub fn minor_line(&self) -> (u64, u64) {
        (self.version.major, self.version.minor)
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}

impl Ord for ReleaseTag {
    /// Order by parsed version; tag label breaks ties so that two labels
    /// naming the same version (e.g. "3.1.1" and "v3.1.1") order
    /// deterministically.
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.tag.cmp(&other.tag))
    }
}

impl PartialOrd for ReleaseTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
