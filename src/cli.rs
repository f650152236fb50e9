//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line front end for the todo backend.
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON config file; falls back to TODO_* environment variables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Obtain a token pair and store it
    Login {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long, env = "TODO_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored tokens
    Logout,
    /// Show who the stored access token belongs to
    Whoami,
    /// List tasks
    List {
        /// Filter by title or description
        #[arg(short, long)]
        search: Option<String>,
        /// deadline, priority or created_at; prefix with '-' for descending
        #[arg(short, long)]
        order: Option<String>,
    },
    /// Create a task
    Add {
        title: String,
        /// RFC 3339 instant or local YYYY-MM-DDTHH:MM
        #[arg(short, long)]
        deadline: String,
        /// L, M or H
        #[arg(short, long, default_value = "M")]
        priority: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark a task completed
    Done { id: u64 },
    /// Mark a task not completed
    Undo { id: u64 },
    /// Delete a task
    Rm { id: u64 },
    /// Show the priorities the backend accepts
    Priorities,
}
