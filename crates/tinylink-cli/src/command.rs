use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a URL to the form
    Add {
        url: String,
        /// Custom short code (4-20 chars of [A-Za-z0-9_-])
        #[arg(short, long)]
        code: Option<String>,
        /// Validity in minutes
        #[arg(short, long, allow_negative_numbers = true)]
        validity: Option<i64>,
    },
    /// Remove a row from the form
    Remove { row: usize },
    /// Show the rows waiting to be submitted
    Form,
    /// Drop every row from the form
    Clear,
    /// Shorten every row of the form at once
    Submit,
    /// List shortened URLs with their statistics
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one shortened URL and its clicks
    Stats {
        code: String,
        /// Only show the most recent N clicks
        #[arg(short, long)]
        last: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Follow a short URL, recording a click
    Visit {
        code: String,
        /// Where the visit came from; quote values containing spaces
        #[arg(short, long)]
        referrer: Option<String>,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

impl Line {
    /// Splits `line` into words with shell quoting rules and parses them.
    pub fn parse_line(line: &str) -> Result<Command, clap::Error> {
        let words = shlex::split(line).ok_or_else(|| {
            Self::command().error(ErrorKind::InvalidValue, "unbalanced quotes in input")
        })?;
        Self::try_parse_from(words).map(|line| line.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_options() {
        let cmd = Line::parse_line("add https://example.com --code abcd -v 90").unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                url: "https://example.com".to_string(),
                code: Some("abcd".to_string()),
                validity: Some(90),
            }
        );
    }

    #[test]
    fn add_accepts_negative_validity() {
        let cmd = Line::parse_line("add https://example.com --validity -5").unwrap();
        assert!(matches!(cmd, Command::Add { validity: Some(-5), .. }));
    }

    #[test]
    fn parses_visit_and_stats() {
        assert_eq!(
            Line::parse_line("visit abcd -r https://ref.example").unwrap(),
            Command::Visit {
                code: "abcd".to_string(),
                referrer: Some("https://ref.example".to_string()),
            }
        );
        assert_eq!(
            Line::parse_line("stats abcd --json").unwrap(),
            Command::Stats {
                code: "abcd".to_string(),
                last: None,
                json: true,
            }
        );
    }

    #[test]
    fn quoted_referrer_keeps_spaces() {
        assert_eq!(
            Line::parse_line(r#"visit abcd --referrer "my site""#).unwrap(),
            Command::Visit {
                code: "abcd".to_string(),
                referrer: Some("my site".to_string()),
            }
        );
    }

    #[test]
    fn unbalanced_quotes_are_an_error() {
        let err = Line::parse_line(r#"visit abcd --referrer "my site"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn stats_takes_a_click_limit() {
        assert_eq!(
            Line::parse_line("stats abcd --last 3").unwrap(),
            Command::Stats {
                code: "abcd".to_string(),
                last: Some(3),
                json: false,
            }
        );
    }

    #[test]
    fn exit_is_quit() {
        assert_eq!(Line::parse_line("exit").unwrap(), Command::Quit);
        assert_eq!(Line::parse_line("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_unknown_and_incomplete() {
        assert!(Line::parse_line("shorten https://example.com").is_err());
        assert!(Line::parse_line("remove").is_err());
        assert!(Line::parse_line("remove one").is_err());
    }

    #[test]
    fn verify_line() {
        Line::command().debug_assert();
    }
}
