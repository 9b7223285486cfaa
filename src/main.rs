mod cli;
mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use cairn_world::{WorldGen, WorldGenParams, load_params_from_path};

use crate::cli::{Cli, Command};
use crate::commands::CliError;

fn load_params(cli: &Cli) -> Result<WorldGenParams, CliError> {
    let mut params = match &cli.config {
        Some(path) => load_params_from_path(path)?,
        None => WorldGenParams::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    Ok(params)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let world = Arc::new(WorldGen::new(load_params(&cli)?));
    match &cli.command {
        Command::Block(args) => commands::block(&world, args),
        Command::Chunk(args) => commands::chunk(&world, args),
        Command::Walk(args) => commands::walk(world, args)?,
        Command::Stream(args) => commands::stream(world, args)?,
        Command::Textures => commands::textures(),
        Command::Frame(args) => commands::frame(&world, args)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
