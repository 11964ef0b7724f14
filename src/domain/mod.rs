//! Domain logic - pure version rules independent of git operations

pub mod describe;
pub mod prerelease;
pub mod quad;
pub mod tag;
pub mod version;

pub use describe::{parse_version, Description, VersionInfo};
pub use prerelease::{PreReleaseChoice, PreReleaseKind};
pub use quad::Quad;
pub use tag::{Tag, TagPrefix};
pub use version::{Identifier, SemanticVersion};
