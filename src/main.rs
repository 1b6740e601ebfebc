use clap::Parser;
use credvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => credvault::cli::commands::init::execute(&cli),
        Commands::Open => credvault::cli::commands::open::execute(&cli),
        Commands::Generate { length } => credvault::cli::commands::generate::execute(&cli, length),
    };

    if let Err(e) = result {
        // user_message folds corruption-shaped unlock failures into the
        // wrong-passphrase wording.
        credvault::cli::output::error(&e.user_message());
        std::process::exit(1);
    }
}
