//! Domain logic - pure version rules independent of git operations

pub mod bounds;
pub mod release;
pub mod selection;

pub use bounds::VersionBounds;
pub use release::ReleaseTag;
pub use selection::select_latest_per_minor;
