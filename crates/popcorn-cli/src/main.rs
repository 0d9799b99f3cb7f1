use clap::{ArgAction, Parser, Subcommand};
use commands::{config, lookup, session};
use popcorn_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Popcorn - search movies, rate them, keep a watched list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr.
    /// `session` logs to the default log file unless this is given
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Search the movie provider by title and print the matching results. An empty query prints an empty list without contacting the provider.")]
    Search {
        /// Title to search for
        query: String,
    },
    /// Show extended details for one movie
    Details {
        /// IMDb id of the movie (e.g. tt0816692)
        imdb_id: String,
    },
    /// Interactive session: search, open details, rate, and build a watched list
    #[command(long_about = "Start an interactive session. Pick results to open their details, rate them with the arrow keys and Enter, and add them to a watched list whose averages are shown between searches. The watched list lives only as long as the session.")]
    Session {
        /// Initial search (defaults to session.initial_query from the config file)
        #[arg(long)]
        query: Option<String>,
    },
    /// Manage configuration and the provider API key
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the OMDb API key in the credentials file
    #[command(name = "api-key")]
    ApiKey {
        /// API key (if not provided, will prompt)
        key: Option<String>,
    },
}

/// Explicit --log-file wins; the interactive session otherwise logs to a file
/// so log lines do not land on top of its menus
fn log_target(command: &Commands, explicit: Option<PathBuf>, paths: &PathManager) -> Option<PathBuf> {
    match (explicit, command) {
        (Some(path), _) => Some(path),
        (None, Commands::Session { .. }) => Some(paths.default_log_file()),
        (None, _) => None,
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = log_target(&cli.command, cli.log_file.clone(), &PathManager::default());
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => lookup::run_search(&query, &output).await,
        Commands::Details { imdb_id } => lookup::run_details(&imdb_id, &output).await,
        Commands::Session { query } => session::run_session(query, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_logs_to_default_file() {
        let paths = PathManager::from_base(PathBuf::from("/tmp/popcorn-test"));
        let session = Commands::Session { query: None };
        assert_eq!(
            log_target(&session, None, &paths),
            Some(PathBuf::from("/tmp/popcorn-test/logs/popcorn.log"))
        );
    }

    #[test]
    fn test_explicit_log_file_wins() {
        let paths = PathManager::from_base(PathBuf::from("/tmp/popcorn-test"));
        let session = Commands::Session { query: None };
        let explicit = PathBuf::from("/var/log/popcorn.log");
        assert_eq!(log_target(&session, Some(explicit.clone()), &paths), Some(explicit));
    }

    #[test]
    fn test_one_shot_commands_log_to_stderr() {
        let paths = PathManager::from_base(PathBuf::from("/tmp/popcorn-test"));
        let search = Commands::Search {
            query: "interstellar".to_string(),
        };
        assert_eq!(log_target(&search, None, &paths), None);
    }
}
