use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_FILE: &str = "todos";

#[derive(Parser, Debug)]
#[command(name = "todoz", bin_name = "todoz", version)]
#[command(about = "File-backed personal task tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Todo file to work on, inside the storage directory
    #[arg(short, long, global = true, default_value = DEFAULT_FILE)]
    pub file: String,

    /// Directory holding todo files (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Summary file written after every change (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Directory containing config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new, empty todo file
    New {
        /// Name of the file (".json" is added)
        name: String,
    },

    /// List todo files in the storage directory
    Files,

    /// Delete a todo file
    #[command(name = "rm-file")]
    RmFile {
        /// Name of the file
        name: String,
    },

    /// Add a todo
    #[command(alias = "a")]
    Add(AddArgs),

    /// List todos
    #[command(alias = "ls")]
    List,

    /// Show one todo
    #[command(alias = "v")]
    Show {
        /// Id of the todo
        id: String,
    },

    /// Change fields of a todo
    #[command(alias = "u")]
    Update(UpdateArgs),

    /// Delete a todo
    #[command(alias = "rm")]
    Delete {
        /// Id of the todo
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// What needs doing
    pub task: String,

    /// Due date (YYYY-MM-DD)
    #[arg(short, long)]
    pub due: String,

    /// LOW, MEDIUM or HIGH (default LOW)
    #[arg(short, long, default_value = "")]
    pub priority: String,

    /// Comma-separated labels
    #[arg(short, long, default_value = "")]
    pub labels: String,

    /// Already done? (yes/no)
    #[arg(short, long, default_value = "")]
    pub completed: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the todo
    pub id: String,

    /// New task text
    #[arg(short, long)]
    pub task: Option<String>,

    /// New due date (YYYY-MM-DD)
    #[arg(short, long)]
    pub due: Option<String>,

    /// New priority
    #[arg(short, long)]
    pub priority: Option<String>,

    /// New comma-separated labels (empty clears them)
    #[arg(short, long)]
    pub labels: Option<String>,

    /// Done? (yes/no)
    #[arg(short, long)]
    pub completed: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "todoz", "add", "Buy milk", "--due", "2025-03-01", "-l", "home,errand",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.task, "Buy milk");
                assert_eq!(args.due, "2025-03-01");
                assert_eq!(args.labels, "home,errand");
                assert_eq!(args.priority, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.file, DEFAULT_FILE);
    }

    #[test]
    fn test_parse_update_only_given_fields() {
        let cli = Cli::try_parse_from(["todoz", "-f", "work", "u", "abc123", "-p", "high"]).unwrap();
        assert_eq!(cli.file, "work");
        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.id, "abc123");
                assert_eq!(args.priority.as_deref(), Some("high"));
                assert!(args.task.is_none());
                assert!(args.labels.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_add_requires_due_date() {
        assert!(Cli::try_parse_from(["todoz", "add", "Buy milk"]).is_err());
    }

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["todoz"]).unwrap();
        assert!(cli.command.is_none());
    }
}
