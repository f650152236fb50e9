//! todo - CLI for the task backend.
//!
//! A thin wrapper over `todo_client`; every task command goes through the
//! authenticated client, so an expired access token is refreshed once.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use jiff::{Timestamp, tz::TimeZone};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use todo_client::tasks::{NewTask, Priority, TaskQuery, parse_deadline, render, render_line};
use todo_client::token::claims::AccessClaims;
use todo_client::{Config, ConfigLocation, Error, TodoClient, read_config};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.downcast_ref::<Error>().is_some_and(Error::is_unauthorized) {
                eprintln!("session expired, run `todo login`");
            } else {
                eprintln!("error: {:#}", err);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let location = match &cli.config {
        Some(path) => ConfigLocation::File(path.display().to_string()),
        None => ConfigLocation::Env,
    };
    read_config(location).context("failed to load configuration")
}

fn describe_claims(claims: &AccessClaims, now: Timestamp) -> String {
    let user = claims
        .user_id
        .as_ref()
        .map(|u| u.to_string())
        .unwrap_or_else(|| "unknown".into());
    match claims.expires_at() {
        Some(exp) if claims.is_expired_at(now) => {
            format!("user {} (access token expired at {})", user, exp)
        }
        Some(exp) => format!("user {} (access token valid until {})", user, exp),
        None => format!("user {}", user),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let todo = TodoClient::new(config)?;

    match cli.command {
        Commands::Login { username, password } => {
            let username = username
                .or_else(|| todo.config().username.clone())
                .context("no username given; pass --username or set TODO_USERNAME")?;
            let password = password
                .or_else(|| todo.config().password.clone())
                .context("no password given; pass --password or set TODO_PASSWORD")?;
            todo.login(&username, &password).await?;
            println!("logged in as {}", username);
        }
        Commands::Logout => {
            todo.logout()?;
            println!("logged out");
        }
        Commands::Whoami => match todo.claims()? {
            None => println!("not logged in"),
            Some(claims) => println!("{}", describe_claims(&claims, Timestamp::now())),
        },
        Commands::List { search, order } => {
            let mut query = TaskQuery::new();
            if let Some(search) = search {
                query = query.search(search);
            }
            if let Some(order) = order {
                query = query.ordering(&order)?;
            }
            let tasks = todo.tasks().list_with(&query).await?;
            if tasks.is_empty() {
                println!("no tasks");
            } else {
                println!("{}", render(&tasks));
            }
        }
        Commands::Add {
            title,
            deadline,
            priority,
            description,
        } => {
            let deadline = parse_deadline(&deadline, &TimeZone::system())?;
            let mut task = NewTask::new(title, deadline)?.priority(priority.parse::<Priority>()?);
            if let Some(description) = description {
                task = task.description(description);
            }
            let created = todo.tasks().create(&task).await?;
            println!("{}", render_line(&created, &TimeZone::system()));
        }
        Commands::Done { id } => {
            let task = todo.tasks().set_completed(id, true).await?;
            println!("{}", render_line(&task, &TimeZone::system()));
        }
        Commands::Undo { id } => {
            let task = todo.tasks().set_completed(id, false).await?;
            println!("{}", render_line(&task, &TimeZone::system()));
        }
        Commands::Rm { id } => {
            todo.tasks().delete(id).await?;
            println!("deleted #{}", id);
        }
        Commands::Priorities => {
            for choice in todo.tasks().priority_choices().await? {
                println!("{}\t{}", choice.value, choice.label);
            }
        }
    }
    Ok(())
}
