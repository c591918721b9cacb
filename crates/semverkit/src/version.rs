//! The semantic version value type

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use crate::builder::VersionBuilder;
use crate::comparator::compare_prerelease;
use crate::error::{type_name, Argument, Result, VersionError};
use crate::field::{Field, Part};
use crate::operator::Operator;
use crate::version_parser::{increment_last_number, parse_version};

/// Token used when a prerelease is bumped on a version that has none
pub const DEFAULT_PRERELEASE_TOKEN: &str = "rc";

/// Token used when build metadata is bumped on a version that has none
pub const DEFAULT_BUILD_TOKEN: &str = "build";

/// A single field of a version as returned by [`Version::get`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartValue<'a> {
    Number(u64),
    Text(&'a str),
}

impl fmt::Display for PartValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartValue::Number(n) => write!(f, "{}", n),
            PartValue::Text(s) => f.write_str(s),
        }
    }
}

/// An immutable Semantic Versioning 2.0.0 version.
///
/// Equality and ordering follow SemVer precedence, so build metadata is
/// ignored: `1.0.0+build1 == 1.0.0+build2`. Use [`Version::to_tuple`] to
/// compare every field.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Option<String>,
    build: Option<String>,
}

impl Version {
    /// A release version without prerelease or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self::from_fields(major, minor, patch, None, None)
    }

    pub(crate) fn from_fields(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Option<String>,
        build: Option<String>,
    ) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: prerelease.filter(|s| !s.is_empty()),
            build: build.filter(|s| !s.is_empty()),
        }
    }

    /// Start a [`VersionBuilder`]
    pub fn builder() -> VersionBuilder {
        VersionBuilder::new()
    }

    /// Parse a version string.
    ///
    /// ```
    /// use semverkit::Version;
    ///
    /// let v = Version::parse("3.4.5-pre.2+build.4").unwrap();
    /// assert_eq!((v.major(), v.minor(), v.patch()), (3, 4, 5));
    /// assert_eq!(v.prerelease(), Some("pre.2"));
    /// assert_eq!(v.build(), Some("build.4"));
    /// ```
    pub fn parse(version: &str) -> Result<Self> {
        let parsed = parse_version(version)?;
        VersionBuilder::new()
            .major(parsed.major)
            .minor(parsed.minor)
            .patch(parsed.patch)
            .prerelease(parsed.prerelease)
            .build_metadata(parsed.build)
            .build()
    }

    /// Parse a dynamic value, which has to be a string
    pub fn parse_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            other => Err(VersionError::InvalidType {
                argument: Argument::Position(0),
                found: type_name(other),
            }),
        }
    }

    /// Check if the string is a valid semver version
    pub fn is_valid(version: &str) -> bool {
        Self::parse(version).is_ok()
    }

    /// Check if a dynamic value is a valid semver version string.
    ///
    /// Format problems yield `Ok(false)`; a value that is not a string at
    /// all is an error.
    pub fn is_valid_value(value: &Value) -> Result<bool> {
        match Self::parse_value(value) {
            Ok(_) => Ok(true),
            Err(e) if e.is_format_error() => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// All five fields, in positional order
    pub fn to_tuple(&self) -> (u64, u64, u64, Option<&str>, Option<&str>) {
        (self.major, self.minor, self.patch, self.prerelease(), self.build())
    }

    /// Ordered mapping of field name to value; absent parts are `null`
    pub fn to_map(&self) -> Map<String, Value> {
        Field::ALL
            .iter()
            .zip(self.to_values())
            .map(|(field, value)| (field.as_str().to_string(), value))
            .collect()
    }

    /// The five fields as dynamic values, in positional order
    pub fn to_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.major),
            Value::from(self.minor),
            Value::from(self.patch),
            Value::from(self.prerelease.clone()),
            Value::from(self.build.clone()),
        ]
    }

    /// The field at a positional index (0 is major, 4 is build).
    ///
    /// ```
    /// use semverkit::{PartValue, Version};
    ///
    /// let v = Version::parse("3.4.5-pre.2").unwrap();
    /// assert_eq!(v.get(0).unwrap(), PartValue::Number(3));
    /// assert_eq!(v.get(3).unwrap(), PartValue::Text("pre.2"));
    /// assert!(v.get(4).is_err());
    /// ```
    pub fn get(&self, index: isize) -> Result<PartValue<'_>> {
        let mut parts = self.parts(index..index.saturating_add(1))?;
        // parts() never returns an empty list
        parts.pop().ok_or(VersionError::UndefinedPart)
    }

    /// The fields within a positional range, skipping absent ones.
    ///
    /// Fails with [`VersionError::NegativeIndex`] when a bound is negative
    /// and with [`VersionError::UndefinedPart`] when nothing is left.
    pub fn parts<R: RangeBounds<isize>>(&self, range: R) -> Result<Vec<PartValue<'_>>> {
        let index = |i: isize| usize::try_from(i).map_err(|_| VersionError::NegativeIndex);
        let len = Field::ALL.len();
        let start = match range.start_bound() {
            Bound::Included(&i) => index(i)?,
            Bound::Excluded(&i) => index(i)?.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&i) => index(i)?.saturating_add(1),
            Bound::Excluded(&i) => index(i)?,
            Bound::Unbounded => len,
        }
        .min(len)
        .max(start);

        let all = [
            Some(PartValue::Number(self.major)),
            Some(PartValue::Number(self.minor)),
            Some(PartValue::Number(self.patch)),
            self.prerelease().map(PartValue::Text),
            self.build().map(PartValue::Text),
        ];
        let parts: Vec<PartValue<'_>> = all[start..end].iter().flatten().copied().collect();
        if parts.is_empty() {
            return Err(VersionError::UndefinedPart);
        }
        Ok(parts)
    }

    /// Raise the major part, resetting minor and patch
    ///
    /// ```
    /// use semverkit::Version;
    ///
    /// let v = Version::parse("3.4.5").unwrap().bump_major().unwrap();
    /// assert_eq!(v.to_string(), "4.0.0");
    /// ```
    pub fn bump_major(&self) -> Result<Version> {
        Ok(Version::new(increment(self.major, Field::Major)?, 0, 0))
    }

    /// Raise the minor part, resetting patch
    pub fn bump_minor(&self) -> Result<Version> {
        Ok(Version::new(self.major, increment(self.minor, Field::Minor)?, 0))
    }

    /// Raise the patch part
    pub fn bump_patch(&self) -> Result<Version> {
        Ok(Version::new(self.major, self.minor, increment(self.patch, Field::Patch)?))
    }

    /// Raise the prerelease part and drop build metadata.
    ///
    /// A version without prerelease gets `<token>.1`; an empty token falls
    /// back to [`DEFAULT_PRERELEASE_TOKEN`].
    pub fn bump_prerelease(&self, token: &str) -> Version {
        let prerelease = bump_text(self.prerelease(), token, DEFAULT_PRERELEASE_TOKEN);
        Version::from_fields(self.major, self.minor, self.patch, Some(prerelease), None)
    }

    /// Raise the build part, keeping everything else.
    ///
    /// A version without build metadata gets `<token>.1`; an empty token
    /// falls back to [`DEFAULT_BUILD_TOKEN`].
    pub fn bump_build(&self, token: &str) -> Version {
        let build = bump_text(self.build(), token, DEFAULT_BUILD_TOKEN);
        Version::from_fields(
            self.major,
            self.minor,
            self.patch,
            self.prerelease.clone(),
            Some(build),
        )
    }

    /// Compare by SemVer precedence
    pub fn compare(&self, other: &Version) -> Ordering {
        self.cmp(other)
    }

    /// Compare against a version string, a named field object or a
    /// positional array.
    ///
    /// Strings must contain a `.`; any other kind of value fails with
    /// [`VersionError::UnsupportedType`].
    pub fn compare_value(&self, other: &Value) -> Result<Ordering> {
        let other = match other {
            Value::String(s) => return self.compare_str(s),
            Value::Object(map) => VersionBuilder::from_map(map)?.build()?,
            Value::Array(items) => VersionBuilder::new().args(items.iter().cloned()).build()?,
            other => return Err(VersionError::UnsupportedType(type_name(other))),
        };
        Ok(self.cmp(&other))
    }

    /// Compare against a version string
    pub fn compare_str(&self, other: &str) -> Result<Ordering> {
        if !other.contains('.') {
            return Err(VersionError::InvalidFormat(other.to_string()));
        }
        let other = VersionBuilder::new().arg(other).build()?;
        Ok(self.cmp(&other))
    }

    /// Determine the next version of `part`, preserving SemVer precedence.
    ///
    /// ```
    /// use semverkit::Version;
    ///
    /// let v = Version::parse("0.1.4").unwrap();
    /// assert_eq!(v.next_version("prerelease", "rc").unwrap().to_string(), "0.1.5-rc.1");
    /// ```
    pub fn next_version(&self, part: &str, prerelease_token: &str) -> Result<Version> {
        self.next(part.parse()?, prerelease_token)
    }

    /// Typed form of [`Version::next_version`]
    pub fn next(&self, part: Part, prerelease_token: &str) -> Result<Version> {
        // Leaving a prerelease for the release it leads up to must not raise
        // a number as well.
        let reaches_release = match part {
            Part::Patch => true,
            Part::Minor => self.patch == 0,
            Part::Major => self.minor == 0 && self.patch == 0,
            Part::Prerelease => false,
        };
        if (self.prerelease.is_some() || self.build.is_some()) && reaches_release {
            return Ok(self.finalize());
        }

        match part {
            Part::Major => self.bump_major(),
            Part::Minor => self.bump_minor(),
            Part::Patch => self.bump_patch(),
            Part::Prerelease if self.prerelease.is_none() => {
                Ok(self.bump_patch()?.bump_prerelease(prerelease_token))
            }
            Part::Prerelease => Ok(self.bump_prerelease(prerelease_token)),
        }
    }

    /// Drop prerelease and build metadata
    pub fn finalize(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }

    /// Return a copy with the named fields replaced.
    ///
    /// ```
    /// use semverkit::Version;
    /// use serde_json::json;
    ///
    /// let v = Version::parse("1.2.3").unwrap();
    /// let v = v.replace([("minor", json!(5)), ("prerelease", json!("beta.1"))]).unwrap();
    /// assert_eq!(v.to_string(), "1.5.3-beta.1");
    /// ```
    pub fn replace<K, I>(&self, parts: I) -> Result<Version>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        VersionBuilder::from_map(&self.to_map())?.fields(parts)?.build()
    }

    /// Evaluate a match expression such as `>=1.0.0` against this version
    ///
    /// ```
    /// use semverkit::Version;
    ///
    /// assert!(Version::parse("2.0.0").unwrap().matches(">=1.0.0").unwrap());
    /// assert!(!Version::parse("1.0.0").unwrap().matches(">1.0.0").unwrap());
    /// ```
    pub fn matches(&self, match_expr: &str) -> Result<bool> {
        let (op, version) = Operator::split_expression(match_expr)?;
        Ok(op.accepts(self.compare_str(version)?))
    }
}

fn increment(value: u64, field: Field) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| VersionError::InvalidValue(format!("{} part {} cannot be raised", field, value)))
}

fn bump_text(current: Option<&str>, token: &str, default_token: &str) -> String {
    match current {
        Some(text) => increment_last_number(text),
        None => {
            let token = if token.is_empty() { default_token } else { token };
            increment_last_number(&format!("{}.0", token))
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| compare_prerelease(self.prerelease(), other.prerelease()))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Prereleases of equal precedence always have the same length
        (self.major, self.minor, self.patch).hash(state);
        self.prerelease().map_or(0, |p| p.chars().count()).hash(state);
    }
}

impl PartialEq<Value> for Version {
    fn eq(&self, other: &Value) -> bool {
        matches!(self.compare_value(other), Ok(Ordering::Equal))
    }
}

impl PartialOrd<Value> for Version {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        self.compare_value(other).ok()
    }
}

impl PartialEq<str> for Version {
    fn eq(&self, other: &str) -> bool {
        matches!(self.compare_str(other), Ok(Ordering::Equal))
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialOrd<str> for Version {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        self.compare_str(other).ok()
    }
}

impl PartialOrd<&str> for Version {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        self.compare_str(other).ok()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Version::parse(&s).map_err(de::Error::custom)
    }
}
