//! SatFinder Control - satellite lookup CLI
//!
//! Looks up a satellite by name or NORAD catalog number and prints a merged
//! fact sheet from the encyclopedia, the entity store and the orbital catalog.

use clap::Parser;
use satctl::cli::Cli;
use satctl::{commands, errors, logging};
use tracing::debug;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let config = match commands::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", console::style("config error:").red().bold(), e);
            std::process::exit(errors::EXIT_CONFIG);
        }
    };
    debug!("Effective languages: {:?}", config.languages);

    let code = match commands::run(&cli, &config) {
        Ok(()) => errors::EXIT_SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", console::style("error:").red().bold(), e);
            errors::exit_code_for(&e)
        }
    };

    std::process::exit(code);
}
