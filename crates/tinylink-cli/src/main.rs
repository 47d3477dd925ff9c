mod cli;
mod command;
mod form;
mod render;
mod repl;
mod session;
mod telemetry;

use crate::cli::{Cli, GeneratorArg};
use crate::form::DraftForm;
use crate::render::Renderer;
use crate::repl::Repl;
use crate::session::Session;
use anyhow::ensure;
use clap::Parser;
use jiff::tz::TimeZone;
use tinylink_core::{ShortCode, SystemClock};
use tinylink_generator::{Generator, RandomGenerator, SeqGenerator};
use tinylink_registry::{Registry, RegistrySettings};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    telemetry::init(config.log_format)?;

    info!(
        base_url = %config.base_url,
        generator = %config.generator,
        code_length = config.code_length,
        max_batch_size = config.max_batch_size,
        max_generation_attempts = config.max_generation_attempts,
        default_validity = config.default_validity,
        "starting tinylink"
    );

    ensure!(config.max_batch_size >= 1, "--max-batch-size must be at least 1");
    ensure!(
        config.max_generation_attempts >= 1,
        "--max-generation-attempts must be at least 1"
    );

    let settings = RegistrySettings::builder()
        .max_batch_size(config.max_batch_size)
        .max_generation_attempts(config.max_generation_attempts)
        .location_placeholder(config.location_placeholder.clone())
        .build();

    match config.generator {
        GeneratorArg::Random => {
            let generator = RandomGenerator::with_length(config.code_length)?;
            run(&config, generator, settings)
        }
        GeneratorArg::Sequential => {
            ensure!(
                ShortCode::is_valid(&format!("{}000000", config.generator_prefix)),
                "--generator-prefix {:?} cannot produce valid short codes",
                config.generator_prefix
            );
            let generator = SeqGenerator::with_prefix(config.generator_prefix.clone());
            run(&config, generator, settings)
        }
    }
}

fn run<G: Generator>(config: &Cli, generator: G, settings: RegistrySettings) -> anyhow::Result<()> {
    let form = DraftForm::new(settings.max_batch_size, config.default_validity);
    let registry = Registry::<G, SystemClock>::with_settings(generator, settings);
    let renderer = Renderer::new(config.base_url.clone(), TimeZone::system());

    Repl::new(Session::new(registry, form, renderer))?.run()
}
