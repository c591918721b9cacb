//! Semantic Versioning 2.0.0 for Rust
//!
//! This crate provides a version value type with SemVer parsing, precedence
//! comparison, match expressions and bump operations.

mod builder;
pub mod comparator;
mod error;
mod field;
mod operator;
mod semver;
mod version;
mod version_parser;

pub use builder::{VersionBuilder, MAX_POSITIONAL};
pub use comparator::Identifier;
pub use error::{Argument, Result, VersionError};
pub use field::{Field, Part};
pub use operator::Operator;
pub use semver::Semver;
pub use version::{PartValue, Version, DEFAULT_BUILD_TOKEN, DEFAULT_PRERELEASE_TOKEN};
pub use version_parser::{increment_last_number, parse_version, ParsedVersion};

/// The version of the Semantic Versioning specification implemented here
pub const SEMVER_SPEC_VERSION: &str = "2.0.0";
