// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line and environment configuration.

use std::path::PathBuf;

use anyhow::{bail, Context};

/// Environment variable naming a theme file when `--theme` is not given.
pub const THEME_ENV: &str = "WAYFIND_THEME";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Venue snapshot JSON.
    pub venue_path: PathBuf,
    /// Theme JSON. `None` selects the built-in theme.
    pub theme_path: Option<PathBuf>,
    /// Where to write the pass output. `None` prints to stdout.
    pub output_path: Option<PathBuf>,
    /// Include planned labels in the output.
    pub labels: bool,
    /// Skip the per-floor summary.
    pub quiet: bool,
}

impl Config {
    /// Parses process arguments (without the program name) and environment.
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn from_args<I>(args: I) -> anyhow::Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        Self::parse(args, std::env::var(THEME_ENV).ok())
    }

    fn parse<I>(args: I, theme_env: Option<String>) -> anyhow::Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut venue_path = None;
        let mut theme_path = None;
        let mut output_path = None;
        let mut labels = false;
        let mut quiet = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--theme" => {
                    let value = args.next().context("--theme needs a path")?;
                    theme_path = Some(PathBuf::from(value));
                }
                "--output" => {
                    let value = args.next().context("--output needs a path")?;
                    output_path = Some(PathBuf::from(value));
                }
                "--labels" => labels = true,
                "--quiet" => quiet = true,
                other if other.starts_with('-') => bail!("unknown option: {other}"),
                other => {
                    if venue_path.is_some() {
                        bail!("unexpected argument: {other}");
                    }
                    venue_path = Some(PathBuf::from(other));
                }
            }
        }

        let Some(venue_path) = venue_path else {
            bail!("missing venue snapshot path");
        };

        Ok(Some(Self {
            venue_path,
            theme_path: theme_path.or_else(|| theme_env.filter(|v| !v.is_empty()).map(PathBuf::from)),
            output_path,
            labels,
            quiet,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_options() {
        let config = Config::parse(
            args(&["venue.json", "--theme", "dark.json", "--output", "out.json", "--labels", "--quiet"]),
            None,
        )
        .unwrap()
        .unwrap();
        assert_eq!(config.venue_path, PathBuf::from("venue.json"));
        assert_eq!(config.theme_path, Some(PathBuf::from("dark.json")));
        assert_eq!(config.output_path, Some(PathBuf::from("out.json")));
        assert!(config.labels);
        assert!(config.quiet);
    }

    #[test]
    fn theme_falls_back_to_environment() {
        let config = Config::parse(args(&["venue.json"]), Some("env.json".into()))
            .unwrap()
            .unwrap();
        assert_eq!(config.theme_path, Some(PathBuf::from("env.json")));

        let flag_wins = Config::parse(args(&["venue.json", "--theme", "flag.json"]), Some("env.json".into()))
            .unwrap()
            .unwrap();
        assert_eq!(flag_wins.theme_path, Some(PathBuf::from("flag.json")));

        let builtin = Config::parse(args(&["venue.json"]), Some(String::new()))
            .unwrap()
            .unwrap();
        assert_eq!(builtin.theme_path, None);
    }

    #[test]
    fn help_and_errors() {
        assert_eq!(Config::parse(args(&["--help"]), None).unwrap(), None);
        assert!(Config::parse(args(&[]), None).is_err());
        assert!(Config::parse(args(&["a.json", "b.json"]), None).is_err());
        assert!(Config::parse(args(&["a.json", "--bogus"]), None).is_err());
        assert!(Config::parse(args(&["a.json", "--theme"]), None).is_err());
    }
}
