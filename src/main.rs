mod cli;
mod config;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, UserCommands};
use legalai_core::config::Config;
use legalai_core::{Role, UserId};
use legalai_db::models::User;
use legalai_db::pool::DbPool;
use legalai_db::queries::{auth, users};
use legalai_server::routes::accounts::MIN_PASSWORD_LEN;
use rusqlite::Connection;
use std::path::Path;

/// Workspace crates that share one log level.
const CRATES: &[&str] = &["legalai", "legalai_server", "legalai_db", "legalai_core"];

fn init_logging(verbose: bool) {
    // RUST_LOG wins; otherwise trace in verbose/debug mode, info elsewhere.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        let (level, http) = if verbose {
            ("trace", "debug")
        } else {
            ("info", "info")
        };
        let mut directives: Vec<String> = CRATES.iter().map(|c| format!("{c}={level}")).collect();
        directives.push(format!("tower_http={http}"));
        directives.join(",")
    });

    tracing_subscriber::fmt().with_env_filter(&env_filter).init();
}

async fn start_server(config: Config) -> Result<()> {
    tracing::info!("Starting Legal AI server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    legalai_server::start(config).await?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start { host, port, debug } => {
            let mut config = config::load_config(cli.config.as_deref())?;
            config::apply_start_overrides(&mut config, host, port, debug);
            init_logging(cli.verbose || config.server.debug);

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(config))
        }
        Commands::Validate {
            config: config_path,
        } => {
            init_logging(cli.verbose);
            let path = config_path.or(cli.config).or_else(config::find_config);
            validate_config(path.as_deref())
        }
        Commands::Migrate => {
            init_logging(cli.verbose);
            migrate(&config::load_config(cli.config.as_deref())?)
        }
        Commands::HashPassword { password, cost } => {
            init_logging(cli.verbose);
            let cost = match cost {
                Some(c) => c,
                None => config::load_config(cli.config.as_deref())?.auth.bcrypt_cost,
            };
            hash_password(&password, cost)
        }
        Commands::User(command) => {
            init_logging(cli.verbose);
            manage_user(&config::load_config(cli.config.as_deref())?, command)
        }
        Commands::Version => {
            println!("legalai {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            let config = Config::load(p)
                .with_context(|| format!("Invalid config file {}", p.display()))?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Debug: {}", config.server.debug);
    println!("  Database: {}", config.server.db_path.display());
    println!("  Auth enabled: {}", config.auth.enabled);
    println!(
        "  Session timeout: {}h",
        config.auth.session_timeout_hours
    );

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }

    Ok(())
}

fn open_db(config: &Config) -> Result<DbPool> {
    let path = &config.server.db_path;
    if config.server.in_memory_db() {
        Ok(legalai_db::pool::init_memory_pool()?)
    } else {
        legalai_db::pool::init_pool(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))
    }
}

fn migrate(config: &Config) -> Result<()> {
    let pool = open_db(config)?;
    let conn = legalai_db::pool::get_conn(&pool)?;
    let version = legalai_db::migrations::current_version(&conn)?;
    println!(
        "Database {} is at schema version {version}",
        config.server.db_path.display()
    );

    let pruned = auth::delete_expired_tokens(&conn, &Utc::now().to_rfc3339())?;
    if pruned > 0 {
        println!("Removed {pruned} expired auth token(s)");
    }
    Ok(())
}

fn manage_user(config: &Config, command: UserCommands) -> Result<()> {
    let pool = open_db(config)?;
    let conn = legalai_db::pool::get_conn(&pool)?;

    match command {
        UserCommands::List => {
            println!("{:<36}  {:<6}  EMAIL", "ID", "ROLE");
            for user in users::list_users(&conn)?
                .iter()
                .filter(|u| u.id != UserId::ANONYMOUS)
            {
                println!("{:<36}  {:<6}  {}", user.id, user.role.as_str(), user.email);
            }
        }
        UserCommands::SetRole { email, role } => {
            let role: Role = role.parse()?;
            let user = find_user(&conn, &email)?;
            users::update_role(&conn, user.id, role)?;
            println!("{} is now a {role}", user.email);
        }
        UserCommands::SetPassword {
            email,
            password,
            cost,
        } => {
            if password.chars().count() < MIN_PASSWORD_LEN {
                bail!("Password must be at least {MIN_PASSWORD_LEN} characters");
            }
            let user = find_user(&conn, &email)?;
            let hash = bcrypt::hash(&password, cost.unwrap_or(config.auth.bcrypt_cost))
                .context("Failed to hash password")?;
            users::update_password(&conn, user.id, &hash)?;
            let revoked = auth::delete_user_tokens(&conn, user.id)?;
            println!(
                "Password updated for {}; revoked {revoked} session(s)",
                user.email
            );
        }
        UserCommands::Delete { email } => {
            let user = find_user(&conn, &email)?;
            users::delete_user(&conn, user.id)?;
            println!("Deleted {}", user.email);
        }
    }
    Ok(())
}

/// Look up an account the operator may change.
fn find_user(conn: &Connection, email: &str) -> Result<User> {
    let user = users::get_user_by_email(conn, email)?
        .with_context(|| format!("No account with email {email}"))?;
    if user.id == UserId::ANONYMOUS {
        bail!("The built-in anonymous account cannot be changed");
    }
    Ok(user)
}

fn hash_password(password: &str, cost: u32) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        eprintln!(
            "warning: passwords shorter than {MIN_PASSWORD_LEN} characters are rejected at registration"
        );
    }
    let hash = bcrypt::hash(password, cost).context("Failed to hash password")?;
    println!("{hash}");
    Ok(())
}
