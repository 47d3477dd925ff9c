use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use tinylink_core::{DEFAULT_LOCATION, DEFAULT_VALIDITY_MINUTES};
use tinylink_generator::random::DEFAULT_LENGTH;
use tinylink_registry::settings::{DEFAULT_MAX_BATCH_SIZE, DEFAULT_MAX_GENERATION_ATTEMPTS};

pub const BASE_URL_ENV: &str = "TINYLINK_BASE_URL";
pub const CODE_LENGTH_ENV: &str = "TINYLINK_CODE_LENGTH";
pub const GENERATOR_ENV: &str = "TINYLINK_GENERATOR";
pub const GENERATOR_PREFIX_ENV: &str = "TINYLINK_GENERATOR_PREFIX";
pub const MAX_BATCH_SIZE_ENV: &str = "TINYLINK_MAX_BATCH_SIZE";
pub const MAX_GENERATION_ATTEMPTS_ENV: &str = "TINYLINK_MAX_GENERATION_ATTEMPTS";
pub const DEFAULT_VALIDITY_ENV: &str = "TINYLINK_DEFAULT_VALIDITY";
pub const LOCATION_PLACEHOLDER_ENV: &str = "TINYLINK_LOCATION_PLACEHOLDER";
pub const LOG_FORMAT_ENV: &str = "TINYLINK_LOG_FORMAT";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_GENERATOR_PREFIX: &str = "tl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    #[value(name = "random")]
    Random,
    #[value(name = "sequential")]
    Sequential,
}

impl Display for GeneratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorArg::Random => write!(f, "random"),
            GeneratorArg::Sequential => write!(f, "sequential"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

/// Interactive in-memory URL shortener.
#[derive(Debug, Parser)]
#[command(name = "tinylink", version)]
pub struct Cli {
    /// Origin the short URLs are displayed under.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Length of randomly generated short codes (4-20).
    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = DEFAULT_LENGTH)]
    pub code_length: usize,

    #[arg(
        long,
        env = GENERATOR_ENV,
        value_enum,
        default_value_t = GeneratorArg::Random
    )]
    pub generator: GeneratorArg,

    /// Prefix of sequential short codes.
    #[arg(
        long,
        env = GENERATOR_PREFIX_ENV,
        default_value = DEFAULT_GENERATOR_PREFIX,
    )]
    pub generator_prefix: String,

    /// Largest number of URLs submitted together.
    #[arg(long, env = MAX_BATCH_SIZE_ENV, default_value_t = DEFAULT_MAX_BATCH_SIZE)]
    pub max_batch_size: usize,

    #[arg(
        long,
        env = MAX_GENERATION_ATTEMPTS_ENV,
        default_value_t = DEFAULT_MAX_GENERATION_ATTEMPTS
    )]
    pub max_generation_attempts: u32,

    /// Validity in minutes for rows added without `--validity`.
    #[arg(
        long,
        env = DEFAULT_VALIDITY_ENV,
        default_value_t = DEFAULT_VALIDITY_MINUTES,
        allow_negative_numbers = true
    )]
    pub default_validity: i64,

    #[arg(long, env = LOCATION_PLACEHOLDER_ENV, default_value = DEFAULT_LOCATION)]
    pub location_placeholder: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["tinylink"]).unwrap();
        assert_eq!(cli.base_url, "http://localhost:3000");
        assert_eq!(cli.code_length, 6);
        assert_eq!(cli.generator, GeneratorArg::Random);
        assert_eq!(cli.generator_prefix, "tl");
        assert_eq!(cli.max_batch_size, 5);
        assert_eq!(cli.max_generation_attempts, 16);
        assert_eq!(cli.default_validity, 30);
        assert_eq!(cli.location_placeholder, "Simulated Location");
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "tinylink",
            "--base-url",
            "https://tiny.example",
            "--generator",
            "sequential",
            "--max-batch-size",
            "3",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "https://tiny.example");
        assert_eq!(cli.generator, GeneratorArg::Sequential);
        assert_eq!(cli.max_batch_size, 3);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_generator() {
        assert!(Cli::try_parse_from(["tinylink", "--generator", "uuid"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
