use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legalai")]
#[command(author, version, about = "Backend for the Legal AI case and bail-application service")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Verbose diagnostics and error details in server-error responses
        #[arg(long)]
        debug: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Create the database if needed, apply pending migrations and remove
    /// expired auth tokens
    Migrate,

    /// Generate a bcrypt password hash
    HashPassword {
        /// Password to hash
        password: String,

        /// bcrypt cost factor (defaults to auth.bcrypt_cost from config)
        #[arg(long)]
        cost: Option<u32>,
    },

    /// Manage user accounts
    #[command(subcommand)]
    User(UserCommands),

    /// Display version information
    Version,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List every account
    List,

    /// Change an account's role (user, lawyer or judge)
    SetRole {
        email: String,
        role: String,
    },

    /// Set a new password and sign the account out everywhere
    SetPassword {
        email: String,
        password: String,

        /// bcrypt cost factor (defaults to auth.bcrypt_cost from config)
        #[arg(long)]
        cost: Option<u32>,
    },

    /// Delete an account together with its tokens and bail forms
    Delete { email: String },
}
