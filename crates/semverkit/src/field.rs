//! Names of the version fields and of the parts that can be advanced

use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

/// The five fields of a version, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Major,
    Minor,
    Patch,
    Prerelease,
    Build,
}

impl Field {
    /// All fields in positional order
    pub const ALL: [Field; 5] = [
        Field::Major,
        Field::Minor,
        Field::Patch,
        Field::Prerelease,
        Field::Build,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Major => "major",
            Field::Minor => "minor",
            Field::Patch => "patch",
            Field::Prerelease => "prerelease",
            Field::Build => "build",
        }
    }

    /// Look up a field by name
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Position of the field in the positional argument form
    pub fn position(&self) -> usize {
        *self as usize
    }

    /// Whether the field holds one of the three integer components
    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::Major | Field::Minor | Field::Patch)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part selector for [`Version::next_version`](crate::Version::next_version)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Major,
    Minor,
    Patch,
    Prerelease,
}

impl Part {
    pub fn as_str(&self) -> &'static str {
        match self {
            Part::Major => "major",
            Part::Minor => "minor",
            Part::Patch => "patch",
            Part::Prerelease => "prerelease",
        }
    }
}

impl FromStr for Part {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Part::Major),
            "minor" => Ok(Part::Minor),
            "patch" => Ok(Part::Patch),
            "prerelease" => Ok(Part::Prerelease),
            _ => Err(VersionError::InvalidArgument(s.to_string())),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
