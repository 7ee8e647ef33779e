mod catalog;
mod cli;
mod db;
mod error;
mod fmt;
mod history;
mod logging;
mod models;
mod numerals;
mod reconciler;
mod registry;
mod session;
mod settings;
mod store;
mod transcript;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init {
            data_dir,
            default_program,
        } => cli::init::run(data_dir, default_program),
        Commands::Programs => cli::programs::list(),
        Commands::Show { target } => cli::show::run(&target),
        Commands::Toggle {
            group,
            course,
            target,
        } => cli::toggle::run(group, course, &target),
        Commands::Import { file, target } => cli::import::run(&file, &target),
        Commands::Reset { yes, target } => cli::reset::run(yes, &target),
        Commands::Status { target } => cli::status::run(&target),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
