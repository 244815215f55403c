//! budgetstep CLI
//!
//! Drives the budgeting service from a terminal. Every command restores the
//! saved selection, runs one action and prints the resulting panels.

use std::path::PathBuf;

use anyhow::Context;
use budgetstep::client::{Api, HttpTransport};
use budgetstep::config::{generate_default_config, Config};
use budgetstep::forms::{AccountForm, BudgetForm, CategoryForm, OperationForm, StepForm};
use budgetstep::model::{Id, OperationKind, Sign};
use budgetstep::render::{self, Panels};
use budgetstep::session::{Outcome, Session, Status};
use budgetstep::state::AppState;
use budgetstep::store::FileStore;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "budgetstep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Step-based household budgeting from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Budgeting service base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text, global = true)]
    pub format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the service answers
    Health,

    /// Show the current budget and step
    Show,

    /// Create a budget and select it
    CreateBudget {
        name: String,
        /// Currency code (default: EUR)
        #[arg(long, default_value = "")]
        currency: String,
        /// Owner user id (default: 1)
        #[arg(long, default_value = "")]
        owner: String,
    },

    /// Select a budget
    UseBudget { id: Id },

    /// Add an account to the current budget
    AddAccount {
        name: String,
        #[arg(long, default_value = "")]
        currency: String,
    },

    /// Add a category to the current budget
    AddCategory { name: String },

    /// Create a month step in the current budget
    CreateStep {
        /// Step name (default: "Step <today>")
        #[arg(long, default_value = "")]
        name: String,
        /// First day, YYYY-MM-DD (default: first of this month)
        #[arg(long, default_value = "")]
        start: String,
        /// Last day, YYYY-MM-DD (default: end of this month)
        #[arg(long, default_value = "")]
        end: String,
    },

    /// Select a step of the current budget
    UseStep { id: Id },

    /// Reload summary and feed of the current step
    Refresh,

    /// Add an operation to the current step
    AddOperation {
        amount: String,
        /// planned or actual
        #[arg(long, default_value = "planned")]
        kind: OperationKind,
        /// income, expense or transfer
        #[arg(long, default_value = "expense")]
        sign: Sign,
        /// Source account id
        #[arg(long)]
        account: Option<Id>,
        /// Destination account id (transfers)
        #[arg(long)]
        to: Option<Id>,
        /// Category id (income and expense)
        #[arg(long)]
        category: Option<Id>,
        #[arg(long, default_value = "")]
        currency: String,
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Copy planned operations of the current step into another step
    CopyPlanned {
        /// Target step id
        to: Id,
    },

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }
    init_logging(&config)?;

    let session = Session::new(
        Api::new(HttpTransport::new(config.api.url.clone())),
        FileStore::in_dir(config.data_dir()),
    );
    tracing::debug!("Using {} with data in {}", config.api.url, config.storage.data_dir);

    if let Commands::Health = cli.command {
        let status = session.check_health().await;
        return finish(cli.format, None, &status);
    }

    let loaded = session.reload_all(AppState::default()).await;
    if !loaded.status.ok {
        return finish(cli.format, Some(&loaded.state), &loaded.status);
    }

    let Outcome { state, status } = run(&session, cli.command, loaded).await;
    finish(cli.format, Some(&state), &status)
}

async fn run(
    session: &Session<HttpTransport, FileStore>,
    command: Commands,
    loaded: Outcome,
) -> Outcome {
    let state = loaded.state;
    match command {
        Commands::Show => Outcome {
            state,
            status: loaded.status,
        },
        Commands::CreateBudget {
            name,
            currency,
            owner,
        } => {
            let form = BudgetForm {
                name,
                currency,
                owner_user_id: owner,
            };
            session.create_budget(state, &form).await
        }
        Commands::UseBudget { id } => session.change_budget(state, id).await,
        Commands::AddAccount { name, currency } => {
            session
                .add_account(state, &AccountForm { name, currency })
                .await
        }
        Commands::AddCategory { name } => session.add_category(state, &CategoryForm { name }).await,
        Commands::CreateStep { name, start, end } => {
            let form = StepForm {
                name,
                date_start: start,
                date_end: end,
            };
            let today = chrono::Local::now().date_naive();
            session.create_step(state, &form, today).await
        }
        Commands::UseStep { id } => session.change_step(state, id).await,
        Commands::Refresh => session.refresh_step(state).await,
        Commands::AddOperation {
            amount,
            kind,
            sign,
            account,
            to,
            category,
            currency,
            comment,
        } => {
            let form = OperationForm {
                kind,
                sign,
                amount,
                currency,
                account_id: account,
                account_id_to: to,
                category_id: category,
                comment,
            };
            session.add_operation(state, &form).await
        }
        Commands::CopyPlanned { to } => session.copy_planned(state, Some(to)).await,
        Commands::Health | Commands::InitConfig { .. } => Outcome {
            state,
            status: loaded.status,
        },
    }
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.level))
        .context("invalid log level")?;

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}

/// Print panels and status; a failed status exits non-zero
fn finish(format: Format, state: Option<&AppState>, status: &Status) -> anyhow::Result<()> {
    let panels = state.map(render::panels);
    match format {
        Format::Json => {
            let output = serde_json::json!({
                "status": { "message": status.message, "ok": status.ok },
                "panels": panels,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            if let Some(panels) = &panels {
                print_panels(panels);
            }
            println!("{}", status.message);
        }
    }

    if !status.ok {
        std::process::exit(1);
    }
    Ok(())
}

fn print_panels(panels: &Panels) {
    println!("Budgets:");
    print_options(&panels.budgets);
    println!("Accounts:");
    print_lines(&panels.accounts);
    println!("Categories:");
    print_lines(&panels.categories);
    println!("Steps:");
    print_options(&panels.steps);

    println!("Summary:");
    match &panels.summary {
        Some(summary) => print_lines(&summary.lines()),
        None => println!("  {}", render::EMPTY_PANEL),
    }
    println!("Feed:");
    for line in &panels.feed {
        println!("  {}", line.text());
    }
    println!();
}

fn print_options(options: &[render::SelectOption]) {
    for option in options {
        let marker = if option.selected { '*' } else { ' ' };
        println!(" {} {}", marker, option.label);
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("  {}", line);
    }
}
