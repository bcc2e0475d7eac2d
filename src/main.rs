use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use taskflow::commands::*;
use taskflow::storage::JsonStore;

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "Terminal task manager with categories and progress stats", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Category ID
        #[arg(short, long)]
        category: Option<u64>,
        /// Priority (low, medium, high, urgent)
        #[arg(short, long)]
        priority: Option<String>,
        /// Due date in YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks
    List {
        /// Only tasks in this category
        #[arg(short, long)]
        category: Option<u64>,
        /// Search in title and description
        #[arg(short, long)]
        search: Option<String>,
        /// Only tasks with this priority
        #[arg(short, long)]
        priority: Option<String>,
        /// Show completed tasks too
        #[arg(short, long)]
        all: bool,
    },
    /// Show completion statistics
    Stats,
    /// Mark a task as complete
    Complete {
        id: u64,
    },
    /// Reopen a completed task
    Reopen {
        id: u64,
    },
    /// Remove a task
    Remove {
        id: u64,
    },
    /// Edit a task
    Edit {
        id: u64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New category ID
        #[arg(short, long)]
        category: Option<u64>,
        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
        /// New due date
        #[arg(long)]
        due: Option<String>,
    },
    /// Rewrite the manual ordering to the given ID sequence
    Reorder {
        /// Task IDs in the desired order
        ids: Vec<u64>,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Reset the database (delete all tasks and categories)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Display color
        #[arg(short, long)]
        color: Option<String>,
        /// Display icon
        #[arg(short, long)]
        icon: Option<String>,
    },
    /// List categories
    List,
    /// Edit a category
    Edit {
        id: u64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color
        #[arg(short, long)]
        color: Option<String>,
        /// New icon
        #[arg(short, long)]
        icon: Option<String>,
    },
    /// Remove a category (its tasks are kept, uncategorized)
    Remove {
        id: u64,
    },
}

fn main() {
    // Keep the handle alive for the whole run; dropping it stops logging.
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|l| l.start())
        .ok();

    let cli = Cli::parse();
    let store = JsonStore::open_default();
    match cli.command {
        Commands::Add { title, description, category, priority, due } => {
            cmd_add(&store, title, description, category, priority, due, false)
        }
        Commands::List { category, search, priority, all } => {
            cmd_list(&store, category, search, priority, all)
        }
        Commands::Stats => cmd_stats(&store),
        Commands::Complete { id } => cmd_complete(&store, id, false),
        Commands::Reopen { id } => cmd_reopen(&store, id, false),
        Commands::Remove { id } => cmd_remove(&store, id, false),
        Commands::Edit { id, title, description, category, priority, due } => {
            cmd_edit(&store, id, title, description, category, priority, due, false)
        }
        Commands::Reorder { ids } => cmd_reorder(&store, ids, false),
        Commands::Category { command } => match command {
            CategoryCommands::Add { name, color, icon } => {
                cmd_category_add(&store, name, color, icon, false)
            }
            CategoryCommands::List => cmd_category_list(&store),
            CategoryCommands::Edit { id, name, color, icon } => {
                cmd_category_edit(&store, id, name, color, icon, false)
            }
            CategoryCommands::Remove { id } => cmd_category_remove(&store, id, false),
        },
        Commands::Reset { force } => cmd_reset(&store, force),
        Commands::Completions { shell } => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "taskflow", &mut io::stdout());
        }
    }
}
