use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod scenario;

#[derive(Parser)]
#[command(name = "autofocus-cli", version, about = "Autofocus CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Activity graphs over a scenario timeline
    Graph {
        #[command(subcommand)]
        action: commands::graph::GraphAction,
    },
    /// Session-trigger evaluation
    Trigger {
        #[command(subcommand)]
        action: commands::trigger::TriggerAction,
    },
    /// Schedule inspection and polling
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleCmd,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Graph { action } => commands::graph::run(action),
        Commands::Trigger { action } => commands::trigger::run(action),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "autofocus-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
