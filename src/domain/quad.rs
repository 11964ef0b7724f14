//! Version quads for Win32 version resources
//!
//! Resource files store versions as four 16-bit numbers. The first three are
//! taken from the semantic version; the fourth ("build") encodes the
//! pre-release state in bands:
//!
//! - alphas (`alpha`, `a`): 10000+
//! - betas (`beta`, `b`): 20000+
//! - release candidates (`rc`): 30000+
//! - releases (no pre-release, or a numeric `-N` suffix): 50000+
//!
//! The pre-release iteration (`rc.5`, or `N` in `-N`) is multiplied by 100 and
//! added to the band; the number of commits since the tag fills the last two
//! digits.
//!
//! - `v1.0.0-alpha` -> `1.0.0.10000`
//! - `v1.0.0-alpha.1` + 7 commits -> `1.0.0.10107`
//! - `v1.0.0-rc.5` -> `1.0.0.30500`
//! - `v1.0.0` -> `1.0.0.50000`
//! - `v1.0.0-5` -> `1.0.0.50500`

use crate::domain::version::{Identifier, SemanticVersion};
use crate::error::{RtagError, Result};
use std::fmt;

const ALPHA_BASE: u16 = 10000;
const BETA_BASE: u16 = 20000;
const RC_BASE: u16 = 30000;
const RELEASE_BASE: u16 = 50000;
const ITERATION_MULTIPLIER: u16 = 100;
const MAX_ITERATION: u64 = 99;
const MAX_ADDITIONAL_COMMITS: u64 = 99;

/// Four-component numeric version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Quad {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub build: u16,
}

impl Quad {
    /// Encode a semantic version and the number of commits since its tag
    ///
    /// Commit counts above 99 are clamped. Build metadata is ignored.
    pub fn from_version(version: &SemanticVersion, additional_commits: u64) -> Result<Self> {
        let component = |n: u64| u16::try_from(n).map_err(|_| RtagError::VersionNumberTooLarge);
        let major = component(version.major)?;
        let minor = component(version.minor)?;
        let patch = component(version.patch)?;

        let mut build = match version.pre.first() {
            None => RELEASE_BASE,
            Some(Identifier::Numeric(n)) => RELEASE_BASE + iteration_offset(*n)?,
            Some(Identifier::Alphanumeric(kind)) => {
                let base = band_base(kind).ok_or(RtagError::UnsupportedPreRelease)?;
                match version.pre.get(1) {
                    Some(Identifier::Numeric(n)) => base + iteration_offset(*n)?,
                    _ => base,
                }
            }
        };

        // bounded by MAX_ADDITIONAL_COMMITS, the cast cannot truncate
        build += additional_commits.min(MAX_ADDITIONAL_COMMITS) as u16;

        Ok(Quad {
            major,
            minor,
            patch,
            build,
        })
    }

    /// `#,#,#,#` form used when generating `.rc` files
    pub fn comma_separated(&self) -> String {
        format!("{},{},{},{}", self.major, self.minor, self.patch, self.build)
    }
}

fn band_base(kind: &str) -> Option<u16> {
    match kind {
        "alpha" | "a" => Some(ALPHA_BASE),
        "beta" | "b" => Some(BETA_BASE),
        "rc" => Some(RC_BASE),
        _ => None,
    }
}

fn iteration_offset(iteration: u64) -> Result<u16> {
    if iteration > MAX_ITERATION {
        return Err(RtagError::ReleaseNumberTooLarge);
    }
    Ok(iteration as u16 * ITERATION_MULTIPLIER)
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.patch, self.build)
    }
}
