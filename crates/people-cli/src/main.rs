use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "people")]
#[command(about = "People Directory - list, create, edit and delete people", long_about = None)]
struct Cli {
    /// Base address of the directory API (overrides config and environment)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a config.toml instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the first page of people
    List {
        /// Records per page
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Create a person
    Create(PersonArgs),
    /// Update a person from the first page
    Update {
        id: u64,
        #[command(flatten)]
        person: PersonArgs,
    },
    /// Delete a person from the first page
    Delete { id: u64 },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct PersonArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the default config file location
    Path,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = commands::config::resolve(cli.config.as_deref(), cli.base_url)?;

    match cli.command {
        Commands::List { page_size } => commands::people::list(&config, page_size).await?,
        Commands::Create(person) => commands::people::create(&config, person.into_dto()).await?,
        Commands::Update { id, person } => {
            commands::people::update(&config, id, person.into_dto()).await?
        }
        Commands::Delete { id } => commands::people::delete(&config, id).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config)?,
            ConfigAction::Path => commands::config::path(cli.config.as_deref())?,
        },
    }

    Ok(())
}

impl PersonArgs {
    fn into_dto(self) -> people_core::person::PersonCreateDto {
        people_core::person::PersonCreateDto::new(self.first_name, self.last_name, self.email)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            ExitCode::FAILURE
        }
    }
}
