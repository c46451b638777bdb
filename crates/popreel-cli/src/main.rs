use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, watched};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "popreel")]
#[command(about = "popreel - search the movie catalog and keep a rated watched shelf")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and manage the shelf interactively
    #[command(long_about = "Interactive loop: type a query of three or more characters to search the catalog, pick a result to view its details, rate it and add it to the watched shelf. An empty input clears the current query; already-shelved movies show your stored rating instead of the rating prompt.")]
    Browse,

    /// Inspect or edit the watched shelf
    #[command(long_about = "List the shelf, show aggregate statistics (count and average ratings/runtime), or remove an entry by its catalog id.")]
    Watched {
        #[command(subcommand)]
        cmd: WatchedCommands,
    },

    /// Configure the catalog endpoint and API key
    #[command(long_about = "Manage the popreel configuration. Running without a subcommand starts the interactive setup.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum WatchedCommands {
    /// List every entry on the shelf
    List,

    /// Show count and average ratings/runtime
    Stats,

    /// Remove an entry by its catalog id
    Remove {
        /// Catalog id of the entry to remove (e.g. tt0110912)
        imdb_id: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration (masks the API key)
    Show {
        /// Show the full API key instead of the masked form
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Create or overwrite the configuration interactively
    Init,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Browse => browse::run(&output).await,
        Commands::Watched { cmd } => match cmd {
            WatchedCommands::List => watched::run_list(&output),
            WatchedCommands::Stats => watched::run_stats(&output),
            WatchedCommands::Remove { imdb_id } => watched::run_remove(&imdb_id, &output),
        },
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Init);
            match cmd {
                ConfigCommands::Show { full } => config::run_show(full, &output),
                ConfigCommands::Init => config::run_init(&output),
            }
        }
    }
}
