//! Octavo Application CLI

use std::{process, sync::Arc};

use clap::{Args, Parser, Subcommand};
use octavo_app::{
    clock::SystemClock,
    context::AppContext,
    database,
    domain::accounts::models::{NewAdministrator, UserUuid},
};

const SCHEMA_SQL: &str = include_str!("../db/schema.sql");

#[derive(Debug, Parser)]
#[command(name = "octavo-app", about = "Octavo CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(DbCommand),
    Root(RootCommand),
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply the schema to the target database.
    Init(DatabaseArgs),
}

#[derive(Debug, Args)]
struct RootCommand {
    #[command(subcommand)]
    command: RootSubcommand,
}

#[derive(Debug, Subcommand)]
enum RootSubcommand {
    /// Create the superuser account.
    Create(CreateRootArgs),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct CreateRootArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Root account email
    #[arg(long)]
    email: String,

    /// Root account password
    #[arg(long)]
    password: String,

    /// Root first name
    #[arg(long, default_value = "Root")]
    first_name: String,

    /// Root last name
    #[arg(long, default_value = "Octavo")]
    last_name: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Db(DbCommand {
            command: DbSubcommand::Init(args),
        }) => init_db(args).await,
        Commands::Root(RootCommand {
            command: RootSubcommand::Create(args),
        }) => create_root(args).await,
    }
}

async fn init_db(args: DatabaseArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    sqlx::raw_sql(SCHEMA_SQL)
        .execute(&pool)
        .await
        .map_err(|error| format!("failed to apply schema: {error}"))?;

    println!("schema applied");

    Ok(())
}

async fn create_root(args: CreateRootArgs) -> Result<(), String> {
    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let app = AppContext::from_database_url(&args.database.database_url, Arc::new(SystemClock))
        .await
        .map_err(|error| format!("failed to initialize app context: {error}"))?;

    let root = app
        .accounts
        .create_root(NewAdministrator {
            uuid: UserUuid::new(),
            email: args.email,
            password: args.password,
            first_name: args.first_name,
            last_name: args.last_name,
        })
        .await
        .map_err(|error| format!("failed to create root account: {error}"))?;

    println!("root_uuid: {}", root.uuid);
    println!("root_email: {}", root.email);

    Ok(())
}
