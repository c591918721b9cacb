use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use semverkit::{Part, Version, DEFAULT_BUILD_TOKEN, DEFAULT_PRERELEASE_TOKEN};
use std::cmp::Ordering;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "semverkit")]
#[command(about = "Semantic Versioning Command Line Interface")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (can be used multiple times)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two versions, printing -1, 0 or 1
    Compare {
        /// First version
        version1: String,
        /// Second version
        version2: String,
    },

    /// Bump a part of a version
    Bump {
        /// Part of the version to raise
        #[arg(value_enum)]
        part: BumpPart,

        /// Version to raise
        version: String,

        /// Token used when the version has no prerelease or build yet
        #[arg(long)]
        token: Option<String>,
    },

    /// Check whether a version is valid; exits with 1 when it is not
    Check {
        /// Version to check
        version: String,
    },

    /// Determine the next version, taking prereleases into account
    Nextver {
        /// Version to raise
        version: String,

        /// One of major, minor, patch, prerelease
        part: String,

        /// Prerelease token
        #[arg(long, default_value = DEFAULT_PRERELEASE_TOKEN)]
        token: String,
    },

    /// Evaluate a match expression such as ">=1.0.0" against a version
    Match {
        /// Version to test
        version: String,

        /// Operator and version, e.g. "<2.0.0"
        #[arg(allow_hyphen_values = true)]
        expr: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BumpPart {
    Major,
    Minor,
    Patch,
    Prerelease,
    Build,
}

/// What a command prints and how the process exits
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    output: Option<String>,
    code: u8,
}

impl Outcome {
    fn print(line: impl ToString) -> Self {
        Outcome {
            output: Some(line.to_string()),
            code: 0,
        }
    }
}

fn parse_version(version: &str) -> Result<Version> {
    Version::parse(version).with_context(|| format!("Invalid version {:?}", version))
}

fn run(command: Commands) -> Result<Outcome> {
    match command {
        Commands::Compare { version1, version2 } => {
            let ordering = parse_version(&version1)?.cmp(&parse_version(&version2)?);
            log::debug!("{} compared to {}: {:?}", version1, version2, ordering);
            let result = match ordering {
                Ordering::Less => -1,
                Ordering::Equal => 0,
                Ordering::Greater => 1,
            };
            Ok(Outcome::print(result))
        }
        Commands::Bump { part, version, token } => {
            let current = parse_version(&version)?;
            log::debug!("Bumping {:?} of {}", part, current);
            let next = match part {
                BumpPart::Major => current.bump_major()?,
                BumpPart::Minor => current.bump_minor()?,
                BumpPart::Patch => current.bump_patch()?,
                BumpPart::Prerelease => {
                    current.bump_prerelease(token.as_deref().unwrap_or(DEFAULT_PRERELEASE_TOKEN))
                }
                BumpPart::Build => current.bump_build(token.as_deref().unwrap_or(DEFAULT_BUILD_TOKEN)),
            };
            Ok(Outcome::print(next))
        }
        Commands::Check { version } => {
            let valid = Version::is_valid(&version);
            log::debug!("{:?} valid: {}", version, valid);
            Ok(Outcome {
                output: None,
                code: if valid { 0 } else { 1 },
            })
        }
        Commands::Nextver { version, part, token } => {
            let part: Part = part.parse()?;
            let next = parse_version(&version)?.next(part, &token)?;
            log::debug!("Next {} version of {} is {}", part, version, next);
            Ok(Outcome::print(next))
        }
        Commands::Match { version, expr } => {
            let matched = parse_version(&version)?
                .matches(&expr)
                .with_context(|| format!("Could not evaluate {:?}", expr))?;
            Ok(Outcome::print(matched))
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(outcome) => {
            if let Some(output) = outcome.output {
                println!("{}", output);
            }
            ExitCode::from(outcome.code)
        }
        Err(e) => {
            eprintln!("ERROR {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(argv: &[&str]) -> Result<Outcome> {
        let args = Args::try_parse_from(std::iter::once("semverkit").chain(argv.iter().copied()))?;
        run(args.command)
    }

    fn output(argv: &[&str]) -> String {
        run_args(argv).unwrap().output.unwrap()
    }

    #[test]
    fn test_compare() {
        assert_eq!(output(&["compare", "1.0.0", "2.0.0"]), "-1");
        assert_eq!(output(&["compare", "2.0.0", "2.0.0+b"]), "0");
        assert_eq!(output(&["compare", "2.0.0", "2.0.0-rc.1"]), "1");
        assert!(run_args(&["compare", "2.0", "2.0.0"]).is_err());
    }

    #[test]
    fn test_bump() {
        assert_eq!(output(&["bump", "major", "3.4.5"]), "4.0.0");
        assert_eq!(output(&["bump", "minor", "3.4.5"]), "3.5.0");
        assert_eq!(output(&["bump", "patch", "3.4.5"]), "3.4.6");
        assert_eq!(output(&["bump", "prerelease", "3.4.5"]), "3.4.5-rc.1");
        assert_eq!(output(&["bump", "prerelease", "3.4.5", "--token", "beta"]), "3.4.5-beta.1");
        assert_eq!(output(&["bump", "build", "3.4.5-rc.1+build.9"]), "3.4.5-rc.1+build.10");
        assert!(Args::try_parse_from(["semverkit", "bump", "epoch", "1.0.0"]).is_err());
    }

    #[test]
    fn test_check() {
        assert_eq!(run_args(&["check", "1.2.3"]).unwrap(), Outcome { output: None, code: 0 });
        assert_eq!(run_args(&["check", "1.2"]).unwrap(), Outcome { output: None, code: 1 });
    }

    #[test]
    fn test_nextver() {
        assert_eq!(output(&["nextver", "0.1.4", "prerelease"]), "0.1.5-rc.1");
        assert_eq!(output(&["nextver", "1.2.3-rc.1", "patch"]), "1.2.3");
        assert_eq!(output(&["nextver", "1.2.3", "prerelease", "--token", "alpha"]), "1.2.4-alpha.1");
        assert!(run_args(&["nextver", "1.2.3", "build"]).is_err());
    }

    #[test]
    fn test_match() {
        assert_eq!(output(&["match", "2.0.0", ">=1.0.0"]), "true");
        assert_eq!(output(&["match", "1.0.0", ">1.0.0"]), "false");
        assert!(run_args(&["match", "1.0.0", "~1.0.0"]).is_err());
    }

    #[test]
    fn test_verbose_flag() {
        let args = Args::try_parse_from(["semverkit", "-vv", "check", "1.0.0"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
