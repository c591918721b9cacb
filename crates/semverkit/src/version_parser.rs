//! SemVer 2.0.0 grammar and string helpers

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Result, VersionError};

lazy_static! {
    // Anchored SemVer 2.0.0 grammar; numeric fields and numeric prerelease
    // identifiers may not carry leading zeros.
    static ref SEMVER_RE: Regex = Regex::new(
        r"(?x)
        ^
        (?P<major>0|[1-9][0-9]*)
        \.
        (?P<minor>0|[1-9][0-9]*)
        \.
        (?P<patch>0|[1-9][0-9]*)
        (?:-(?P<prerelease>
            (?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)
            (?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*
        ))?
        (?:\+(?P<build>
            [0-9a-zA-Z-]+
            (?:\.[0-9a-zA-Z-]+)*
        ))?
        $
        "
    ).unwrap();

    // Group 1 ends up holding the last run of digits in the string
    static ref LAST_NUMBER_RE: Regex = Regex::new(r"(?:[^0-9]*([0-9]+)[^0-9]*)+").unwrap();
}

/// The five textual pieces of a version string that matched the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedVersion<'a> {
    pub major: &'a str,
    pub minor: &'a str,
    pub patch: &'a str,
    pub prerelease: Option<&'a str>,
    pub build: Option<&'a str>,
}

/// Split a version string into its fields, failing when the string does
/// not match the grammar end to end.
pub fn parse_version(version: &str) -> Result<ParsedVersion<'_>> {
    let caps = SEMVER_RE
        .captures(version)
        .ok_or_else(|| VersionError::InvalidFormat(version.to_string()))?;

    // The three numeric groups are mandatory, so they are always present
    // once the anchored expression matched.
    let group = |name: &str| caps.name(name).map(|m| m.as_str());
    match (group("major"), group("minor"), group("patch")) {
        (Some(major), Some(minor), Some(patch)) => Ok(ParsedVersion {
            major,
            minor,
            patch,
            prerelease: group("prerelease"),
            build: group("build"),
        }),
        _ => Err(VersionError::InvalidFormat(version.to_string())),
    }
}

/// Increment the last run of digits in `s`.
///
/// The new number is written so that it ends where the old run ended. When
/// it is shorter than the old run the leading characters of the run are
/// kept (`rc.009` becomes `rc.010`); when it is longer the whole run is
/// replaced (`rc.9` becomes `rc.10`). Strings without digits are returned
/// unchanged.
pub fn increment_last_number(s: &str) -> String {
    let Some(run) = LAST_NUMBER_RE.captures(s).and_then(|c| c.get(1)) else {
        return s.to_string();
    };

    let next = increment_digits(run.as_str());
    let (start, end) = (run.start(), run.end());
    let cut = end.saturating_sub(next.len()).max(start);

    let mut out = String::with_capacity(s.len() + 1);
    out.push_str(&s[..cut]);
    out.push_str(&next);
    out.push_str(&s[end..]);
    out
}

/// Add one to a decimal digit string of any length. The result carries
/// no leading zeros.
fn increment_digits(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let mut bytes: Vec<u8> = trimmed.bytes().collect();

    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
            break;
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }

    // Only ASCII digits were written
    String::from_utf8(bytes).unwrap_or_default()
}
