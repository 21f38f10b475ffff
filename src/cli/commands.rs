//! CLI commands and argument parsing

use crate::cheermote::{CheermoteBackground, CheermoteScale, CheermoteState};
use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Helix API client CLI
#[derive(Parser, Debug)]
#[command(name = "helix-kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Page through a cursor-paginated endpoint and print every record
    Pages {
        /// Endpoint path, e.g. `subscriptions`
        endpoint: String,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,

        /// Scope the endpoint requires
        #[arg(long)]
        scope: Option<String>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,

        /// Stop once the server-reported total is reached
        #[arg(long)]
        with_total: bool,
    },

    /// Print the total reported by a total-aware endpoint
    Total {
        /// Endpoint path
        endpoint: String,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,

        /// Scope the endpoint requires
        #[arg(long)]
        scope: Option<String>,
    },

    /// Find cheermotes in a message
    Cheers {
        /// Cheermote catalog: a saved `bits/cheermotes` response (JSON)
        #[arg(long)]
        catalog: PathBuf,

        /// Chat message to scan
        #[arg(short, long)]
        message: String,

        /// Image background
        #[arg(long, default_value = "dark", value_parser = parse_background)]
        background: CheermoteBackground,

        /// Image state
        #[arg(long, default_value = "animated", value_parser = parse_state)]
        state: CheermoteState,

        /// Image scale
        #[arg(long, default_value = "1", value_parser = parse_scale)]
        scale: CheermoteScale,

        /// Print the message split into text and cheermote parts
        #[arg(long)]
        transform: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_key_value(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| Error::invalid_request(format!("expected key=value, got '{s}'")))?;
    if key.is_empty() {
        return Err(Error::invalid_request(format!("empty key in '{s}'")));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_background(s: &str) -> Result<CheermoteBackground> {
    s.parse()
}

fn parse_state(s: &str) -> Result<CheermoteState> {
    s.parse()
}

fn parse_scale(s: &str) -> Result<CheermoteScale> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("broadcaster_id=123", "broadcaster_id", "123" ; "simple")]
    #[test_case("started_at=2024-01-01T00:00:00Z", "started_at", "2024-01-01T00:00:00Z" ; "value with colons")]
    #[test_case("q=a=b", "q", "a=b" ; "first equals splits")]
    #[test_case("user_id=", "user_id", "" ; "empty value")]
    fn test_parse_key_value(input: &str, key: &str, value: &str) {
        assert_eq!(
            parse_key_value(input).unwrap(),
            (key.to_string(), value.to_string())
        );
    }

    #[test_case("novalue" ; "missing equals")]
    #[test_case("=x" ; "empty key")]
    fn test_parse_key_value_rejects(input: &str) {
        assert!(parse_key_value(input).is_err());
    }

    #[test]
    fn test_parse_pages_command() {
        let cli = Cli::try_parse_from([
            "helix-kit",
            "--config",
            "helix.yaml",
            "pages",
            "subscriptions",
            "-q",
            "broadcaster_id=1",
            "-q",
            "user_id=2",
            "--scope",
            "channel:read:subscriptions",
            "--max-pages",
            "3",
            "--with-total",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("helix.yaml")));
        match cli.command {
            Commands::Pages {
                endpoint,
                query,
                scope,
                max_pages,
                with_total,
            } => {
                assert_eq!(endpoint, "subscriptions");
                assert_eq!(query.len(), 2);
                assert_eq!(scope.as_deref(), Some("channel:read:subscriptions"));
                assert_eq!(max_pages, Some(3));
                assert!(with_total);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_cheers_command() {
        let cli = Cli::try_parse_from([
            "helix-kit",
            "cheers",
            "--catalog",
            "cheermotes.json",
            "--message",
            "Cheer100 hi",
            "--background",
            "light",
            "--scale",
            "1.5",
            "--transform",
        ])
        .unwrap();

        match cli.command {
            Commands::Cheers {
                background,
                state,
                scale,
                transform,
                ..
            } => {
                assert_eq!(background, CheermoteBackground::Light);
                assert_eq!(state, CheermoteState::Animated);
                assert_eq!(scale, CheermoteScale::OneAndHalf);
                assert!(transform);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_scale() {
        let result = Cli::try_parse_from([
            "helix-kit",
            "cheers",
            "--catalog",
            "c.json",
            "--message",
            "x",
            "--scale",
            "5",
        ]);
        assert!(result.is_err());
    }
}
