use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::domain::{ReleaseTag, VersionBounds};

/// Reduce raw tag labels to the newest release of each minor line
///
/// Labels that do not parse as releases are dropped silently (logged at
/// debug level), as are releases outside the bounds. The survivors are
/// grouped by (major, minor) and each group keeps only its maximum,
/// returned newest line first, which is the order the build driver
/// processes them.
pub fn select_latest_per_minor(tags: &[String], bounds: &VersionBounds) -> Vec<ReleaseTag> {
    let mut best: HashMap<(u64, u64), ReleaseTag> = HashMap::new();

    for label in tags {
        let release = match ReleaseTag::parse(label) {
            Some(release) => release,
            None => {
                debug!("Dropping tag '{}': not a release version", label);
                continue;
            }
        };

        if !bounds.contains(&release.version) {
            debug!("Dropping tag '{}': outside version bounds", label);
            continue;
        }

        match best.entry(release.minor_line()) {
            Entry::Occupied(mut current) => {
                if release > *current.get() {
                    current.insert(release);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(release);
            }
        }
    }

    let mut selected: Vec<ReleaseTag> = best.into_values().collect();
    selected.sort_by(|a, b| b.cmp(a));
    selected
}
