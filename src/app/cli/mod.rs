//! CLI Adapter.

mod pool;
mod provider;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::commands::pool::{CreateOutcome, DeleteOutcome};
use crate::app::config::load_defaults;
use crate::domain::{AppError, BindingAttribute, WifConfig};

#[derive(Parser)]
#[command(name = "gcp-wif")]
#[command(version)]
#[command(
    about = "Configure Google Cloud Workload Identity Federation for GitHub Actions",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    resources: ResourceArgs,
    #[command(subcommand)]
    command: Commands,
}

/// Values that skip the matching interactive step when given.
#[derive(Args, Debug, Default)]
struct ResourceArgs {
    /// Google Cloud project ID
    #[arg(short, long, global = true)]
    project: Option<String>,
    /// Workload identity pool name
    #[arg(long, global = true)]
    pool: Option<String>,
    /// Workload identity pool provider name
    #[arg(long, global = true)]
    provider: Option<String>,
    /// Service account email
    #[arg(long, global = true)]
    service_account: Option<String>,
    /// GitHub repository owner (case sensitive)
    #[arg(long, global = true)]
    github_owner: Option<String>,
    /// GitHub repository name (case sensitive)
    #[arg(long, global = true)]
    github_repo: Option<String>,
    /// Allow creating a provider without a repository condition
    #[arg(long = "unsafe", global = true)]
    unsafe_conditions: bool,
    /// Defaults file (defaults to ./gcp-wif.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log gcloud invocations to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage workload identity pools
    Pool {
        #[command(subcommand)]
        command: pool::PoolCommands,
    },
    /// Manage OIDC providers within a pool
    Provider {
        #[command(subcommand)]
        command: provider::ProviderCommands,
    },
    /// Associate a service account with GitHub jobs
    #[clap(name = "auth-bind", visible_alias = "bind")]
    AuthBind(BindingArgs),
    /// Print the GitHub Actions workflow snippet
    #[clap(name = "yaml-dump", visible_alias = "yaml")]
    YamlDump,
    /// Create pool and provider, bind a service account and print the snippet
    Setup(BindingArgs),
}

#[derive(Args, Debug, Default)]
struct BindingArgs {
    /// Token attribute to bind on (workflow, repository, environment, actor, ref)
    #[arg(long, value_parser = parse_attribute)]
    attribute: Option<BindingAttribute>,
    /// Attribute value (case sensitive)
    #[arg(long)]
    value: Option<String>,
}

fn parse_attribute(value: &str) -> Result<BindingAttribute, String> {
    BindingAttribute::from_name(value).ok_or_else(|| {
        format!("unknown attribute '{}': expected workflow, repository, environment, actor or ref", value)
    })
}

fn init_logging(verbose: bool) {
    let default = if verbose { "gcp_wif=debug" } else { "gcp_wif=warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_config(args: ResourceArgs) -> Result<WifConfig, AppError> {
    let mut cfg = WifConfig {
        project_id: args.project,
        project_number: None,
        pool: args.pool,
        provider: args.provider,
        service_account: args.service_account,
        github_owner: args.github_owner,
        github_repo: args.github_repo,
        unsafe_conditions: args.unsafe_conditions,
    };
    let cwd = std::env::current_dir()?;
    cfg.apply_defaults(load_defaults(args.config.as_deref(), &cwd)?);
    Ok(cfg)
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.resources.verbose);

    let result = build_config(cli.resources).and_then(|cfg| match cli.command {
        Commands::Pool { command } => pool::run_pool(command, cfg),
        Commands::Provider { command } => provider::run_provider(command, cfg),
        Commands::AuthBind(binding) => run_auth_bind(binding, cfg),
        Commands::YamlDump => run_yaml_dump(cfg),
        Commands::Setup(binding) => run_setup(binding, cfg),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn report_create(kind: &str, outcome: &CreateOutcome) {
    match outcome {
        CreateOutcome::Created(name) => println!("✅ Created {} {}", kind, name),
        CreateOutcome::AlreadyExists(name) => println!("✅ {} {} already exists", kind, name),
    }
}

fn report_delete(kind: &str, outcome: &DeleteOutcome) {
    match outcome {
        DeleteOutcome::Deleted(name) => println!("✅ Deleted {} {}", kind, name),
        DeleteOutcome::Cancelled => println!("Deletion cancelled"),
    }
}

fn run_auth_bind(binding: BindingArgs, cfg: WifConfig) -> Result<(), AppError> {
    let binding = crate::app::api::auth_bind(cfg, binding.attribute, binding.value)?;
    println!(
        "✅ Bound service account on attribute.{} = {}",
        binding.attribute.name(),
        binding.value
    );
    Ok(())
}

fn run_yaml_dump(cfg: WifConfig) -> Result<(), AppError> {
    let snippet = crate::app::api::yaml_dump(cfg)?;
    println!("{}", snippet);
    Ok(())
}

fn run_setup(binding: BindingArgs, cfg: WifConfig) -> Result<(), AppError> {
    let outcome = crate::app::api::run_setup(cfg, binding.attribute, binding.value)?;
    report_create("pool", &outcome.pool);
    report_create("provider", &outcome.provider);
    println!(
        "✅ Bound service account on attribute.{} = {}",
        outcome.binding.attribute.name(),
        outcome.binding.value
    );
    println!("{}", outcome.snippet);
    Ok(())
}
