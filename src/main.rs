use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use group_ledger::cli::{
    handle_audit_command, handle_category_command, handle_expense_command, handle_export_command,
    handle_report_command, handle_settle_command,
};
use group_ledger::config::{paths::LedgerPaths, settings::Settings};
use group_ledger::storage::Storage;

/// Environment variable overriding the configured log filter
const LOG_ENV: &str = "GROUP_LEDGER_LOG";

#[derive(Parser)]
#[command(
    name = "gledger",
    version,
    about = "Shared expense ledger for groups",
    long_about = "gledger keeps an append-only expense ledger per group, reports \
                  spending per month, year and overall, and works out who should \
                  pay whom to split the costs evenly."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand)]
    Category(group_ledger::cli::CategoryCommands),

    /// Record and list expenses
    #[command(subcommand)]
    Expense(group_ledger::cli::ExpenseCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(group_ledger::cli::ReportCommands),

    /// Work out who pays whom so everyone spent the same
    Settle(group_ledger::cli::SettleArgs),

    /// Export the expenses of one window to CSV
    Export(group_ledger::cli::ExportArgs),

    /// Show recent ledger changes
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Initialize the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);
    debug!(base_dir = %paths.base_dir().display(), "starting");

    // Initialize storage
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Settle(args)) => {
            handle_settle_command(&storage, &settings, args)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, args)?;
        }
        Some(Commands::Audit { count }) => {
            handle_audit_command(&storage, count)?;
        }
        Some(Commands::Init) => {
            println!("Initializing group-ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next, give a group some categories:");
            println!("  gledger category set <group> \"Food, Rent, Travel\"");
        }
        Some(Commands::Config) => {
            println!("group-ledger Configuration");
            println!("==========================");
            println!("Base directory:     {}", paths.base_dir().display());
            println!("Expenses directory: {}", paths.expenses_dir().display());
            println!("Audit log:          {}", paths.audit_log().display());
            println!("Initialized:        {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {:?}", settings.currency_symbol);
            println!("  Fallback category: {}", settings.fallback_category);
            println!("  Log filter:        {}", settings.log_filter);
            println!("  Bar width:         {}", settings.bar_width);
        }
        None => {
            println!("gledger - shared expense ledger for groups");
            println!();
            println!("Run 'gledger --help' for usage information.");
        }
    }

    Ok(())
}
