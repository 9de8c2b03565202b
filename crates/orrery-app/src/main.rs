//! The binary entry point for the orrery viewer.

use clap::Parser;

use orrery_config::{CliArgs, Config};

mod renderer;
mod window;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir);

    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Falling back to default config: {e}");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&config));

    window::run_with_config(config);
}
