mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "autolaunch",
    version,
    about = "Launch a list of programs in order, with delays, when your session starts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the configured programs in order
    Run(ConfigArgs),
    /// Start autolaunch automatically when you log in
    Register(ConfigArgs),
    /// Remove the login registration
    Uninstall,
    /// Show whether autolaunch is registered to run at login
    Status,
    /// Create starter configuration files
    Init,
    /// Validate the program list without launching anything
    Check(ConfigArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Program list to use instead of ~/.config/autolaunch/config.json
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let settings = autolaunch_core::settings::load();
    autolaunch_core::log::init(&settings.log);

    match cli.command {
        Commands::Run(args) => commands::run::execute(&args, &settings),
        Commands::Register(args) => commands::autostart::register(&args, &settings),
        Commands::Uninstall => commands::autostart::uninstall(),
        Commands::Status => commands::autostart::status(),
        Commands::Init => commands::init::execute(),
        Commands::Check(args) => commands::check::execute(&args, &settings),
    }
}
