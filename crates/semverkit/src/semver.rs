//! Semver facade providing operations on version strings

use std::cmp::Ordering;

use serde_json::Value;

use crate::error::Result;
use crate::version::Version;

/// Main facade for semantic versioning operations on plain strings
pub struct Semver;

impl Semver {
    /// Parse a version string
    pub fn parse(version: &str) -> Result<Version> {
        Version::parse(version)
    }

    /// Check if the string is a valid semver version
    pub fn is_valid(version: &str) -> bool {
        Version::is_valid(version)
    }

    /// Compare two version strings by precedence
    ///
    /// ```
    /// use semverkit::Semver;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Semver::compare("1.0.0", "2.0.0").unwrap(), Ordering::Less);
    /// assert_eq!(Semver::compare("2.0.0", "2.0.0").unwrap(), Ordering::Equal);
    /// ```
    pub fn compare(version1: &str, version2: &str) -> Result<Ordering> {
        Ok(Version::parse(version1)?.cmp(&Version::parse(version2)?))
    }

    /// Check if a version string satisfies a match expression like `>=1.0.0`
    pub fn matches(version: &str, match_expr: &str) -> Result<bool> {
        Version::parse(version)?.matches(match_expr)
    }

    /// The greater of two versions; on a tie the first one is returned
    pub fn max_ver<'a>(version1: &'a str, version2: &'a str) -> Result<&'a str> {
        match Self::compare(version1, version2)? {
            Ordering::Less => Ok(version2),
            _ => Ok(version1),
        }
    }

    /// The smaller of two versions; on a tie the first one is returned
    pub fn min_ver<'a>(version1: &'a str, version2: &'a str) -> Result<&'a str> {
        match Self::compare(version1, version2)? {
            Ordering::Greater => Ok(version2),
            _ => Ok(version1),
        }
    }

    /// Format version parts into a version string.
    ///
    /// Empty prerelease or build strings are left out.
    pub fn format_version(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Option<&str>,
        build: Option<&str>,
    ) -> String {
        Version::from_fields(
            major,
            minor,
            patch,
            prerelease.map(str::to_string),
            build.map(str::to_string),
        )
        .to_string()
    }

    /// Raise the major part of a version string
    pub fn bump_major(version: &str) -> Result<String> {
        Ok(Version::parse(version)?.bump_major()?.to_string())
    }

    /// Raise the minor part of a version string
    pub fn bump_minor(version: &str) -> Result<String> {
        Ok(Version::parse(version)?.bump_minor()?.to_string())
    }

    /// Raise the patch part of a version string
    pub fn bump_patch(version: &str) -> Result<String> {
        Ok(Version::parse(version)?.bump_patch()?.to_string())
    }

    /// Raise the prerelease part of a version string
    ///
    /// ```
    /// use semverkit::Semver;
    ///
    /// assert_eq!(Semver::bump_prerelease("3.4.5", "rc").unwrap(), "3.4.5-rc.1");
    /// ```
    pub fn bump_prerelease(version: &str, token: &str) -> Result<String> {
        Ok(Version::parse(version)?.bump_prerelease(token).to_string())
    }

    /// Raise the build part of a version string
    pub fn bump_build(version: &str, token: &str) -> Result<String> {
        Ok(Version::parse(version)?.bump_build(token).to_string())
    }

    /// Strip prerelease and build metadata from a version string
    pub fn finalize_version(version: &str) -> Result<String> {
        Ok(Version::parse(version)?.finalize().to_string())
    }

    /// Replace named fields of a version string
    pub fn replace<K, I>(version: &str, parts: I) -> Result<String>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Ok(Version::parse(version)?.replace(parts)?.to_string())
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        // Parsed versions with their original index
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| match Version::parse(v) {
                Ok(parsed) => Some((parsed, i)),
                Err(e) => {
                    log::debug!("Skipping {:?} while sorting: {}", v, e);
                    None
                }
            })
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            if ascending {
                a.cmp(b)
            } else {
                b.cmp(a)
            }
        });

        // Return original versions in sorted order
        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}
