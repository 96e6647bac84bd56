//! # pawtrip-core
//!
//! Build metadata shared by the pawtrip binaries.
//!
//! This crate has no workspace dependencies so every other crate, including
//! the CLI, can import it without pulling in the domain.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::env::consts;

/// Build-time information about the running binary.
///
/// # Example
///
/// ```
/// use pawtrip_core::build_info;
///
/// let info = build_info();
/// println!("{}", info.version_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Package name from Cargo.toml.
    pub name: &'static str,
    /// Package version from Cargo.toml (semver).
    pub version: &'static str,
    /// Minimum supported Rust version declared by the workspace.
    pub rust_version: &'static str,
    /// Target platform as `arch-os`.
    pub platform: Platform,
    /// Build profile.
    pub profile: Profile,
    /// Short git commit hash, when provided at build time.
    pub git_hash: Option<&'static str>,
    /// Whether the build had uncommitted changes.
    pub git_dirty: bool,
}

/// Compile-time target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// CPU architecture (`x86_64`, `aarch64`, ...).
    pub arch: &'static str,
    /// Operating system (`linux`, `macos`, `windows`, ...).
    pub os: &'static str,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}-{}", self.arch, self.os)
    }
}

/// Cargo build profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Built with debug assertions.
    Debug,
    /// Built without debug assertions.
    Release,
}

impl Profile {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl BuildInfo {
    /// Returns `name version (hash[-dirty])`, or `name version` without git info.
    #[must_use]
    pub fn version_string(&self) -> String {
        match (self.git_hash, self.git_dirty) {
            (Some(hash), true) => format!("{} {} ({hash}-dirty)", self.name, self.version),
            (Some(hash), false) => format!("{} {} ({hash})", self.name, self.version),
            (None, _) => format!("{} {}", self.name, self.version),
        }
    }

    /// Returns true if this is a debug build.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        matches!(self.profile, Profile::Debug)
    }
}

/// Returns build-time information about the binary.
///
/// ```
/// use pawtrip_core::build_info;
///
/// let info = build_info();
/// assert!(!info.name.is_empty());
/// ```
#[must_use]
pub const fn build_info() -> BuildInfo {
    BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        rust_version: env!("CARGO_PKG_RUST_VERSION"),
        platform: Platform {
            arch: consts::ARCH,
            os: consts::OS,
        },
        profile: if cfg!(debug_assertions) {
            Profile::Debug
        } else {
            Profile::Release
        },
        git_hash: option_env!("GIT_HASH"),
        git_dirty: option_env!("GIT_DIRTY").is_some(),
    }
}
