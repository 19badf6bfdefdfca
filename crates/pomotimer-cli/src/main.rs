use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod logging;
mod tui;

#[derive(Parser)]
#[command(name = "pomotimer", version, about = "Work/break interval timer")]
struct Cli {
    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive timer (default)
    Run(commands::run::RunArgs),
    /// Preview upcoming sessions
    Plan(commands::plan::PlanArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Run(commands::run::RunArgs::default()));

    let result = match command {
        Commands::Run(args) => match logging::init_file(cli.debug) {
            Ok(_guard) => commands::run::run(args),
            Err(e) => Err(e),
        },
        Commands::Plan(args) => {
            logging::init_stderr(cli.debug);
            commands::plan::run(args)
        }
        Commands::Config { action } => {
            logging::init_stderr(cli.debug);
            commands::config::run(action)
        }
        Commands::Completions { shell } => {
            logging::init_stderr(cli.debug);
            commands::completions::run(shell, &mut Cli::command())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
