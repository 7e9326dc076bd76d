use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sitebook::cli::{
    handle_backup_command, handle_expense_command, handle_export_command, handle_import_command,
    handle_income_command, handle_labour_command, handle_report_command, handle_settings_command,
    handle_sync_command, handle_vendor_command, BackupCommands, ExpenseCommands, ExportCommands,
    IncomeCommands, LabourCommands, ReportCommands, SettingsCommands, SyncCommands,
    VendorCommands,
};
use sitebook::config::{SitebookPaths, Settings};
use sitebook::services::DataService;
use sitebook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "sitebook",
    version,
    about = "Bookkeeping for a construction site",
    long_about = "Sitebook records the money partners put into a building project, \
                  site expenses, and labour attendance and wages, and works out \
                  balances, partner shares and wages due from those records."
)]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Money put into the project
    #[command(subcommand, alias = "in")]
    Income(IncomeCommands),

    /// Money spent on the site
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Suppliers
    #[command(subcommand)]
    Vendor(VendorCommands),

    /// Workers, attendance and wages
    #[command(subcommand, alias = "labor")]
    Labour(LabourCommands),

    /// Dashboard, partner, labour and history reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),

    /// Replace all data with a JSON or YAML snapshot
    Import {
        /// Snapshot file (.json, .yaml or .yml)
        file: PathBuf,
        /// Apply the import; without this only a preview is shown
        #[arg(long)]
        confirm: bool,
    },

    /// Backup management
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Google Sheet sync
    #[command(subcommand)]
    Sync(SyncCommands),

    /// Project settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Delete every record (settings are kept)
    Reset {
        #[arg(long)]
        confirm: bool,
    },

    /// Show recent entries of the audit log
    Audit {
        /// Number of entries
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

impl Commands {
    /// Whether the command changes records, for auto-sync
    fn mutates_records(&self) -> bool {
        match self {
            Commands::Income(cmd) => matches!(
                cmd,
                IncomeCommands::Add { .. } | IncomeCommands::Edit { .. } | IncomeCommands::Delete { .. }
            ),
            Commands::Expense(cmd) => matches!(
                cmd,
                ExpenseCommands::Add { .. }
                    | ExpenseCommands::Edit { .. }
                    | ExpenseCommands::Delete { .. }
            ),
            Commands::Vendor(cmd) => !matches!(cmd, VendorCommands::List),
            Commands::Labour(cmd) => !matches!(
                cmd,
                LabourCommands::List
                    | LabourCommands::Show { .. }
                    | LabourCommands::Attendance { .. }
                    | LabourCommands::Payments { .. }
            ),
            Commands::Backup(BackupCommands::Restore { force, .. }) => *force,
            Commands::Import { confirm, .. } | Commands::Reset { confirm } => *confirm,
            _ => false,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    sitebook::init_tracing(cli.verbose);

    let paths = SitebookPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths.clone())?;

    let Some(command) = cli.command else {
        println!("Sitebook - bookkeeping for a construction site");
        println!();
        println!("Run 'sitebook --help' for usage information.");
        println!("Run 'sitebook report dashboard' for the project summary.");
        return Ok(());
    };
    let sync_after = command.mutates_records();

    match command {
        Commands::Income(cmd) => handle_income_command(&storage, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, cmd)?,
        Commands::Vendor(cmd) => handle_vendor_command(&storage, cmd)?,
        Commands::Labour(cmd) => handle_labour_command(&storage, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, cmd)?,
        Commands::Import { file, confirm } => {
            handle_import_command(&storage, &settings, &file, confirm)?;
            // the snapshot may carry its own settings
            settings = Settings::load_or_create(&paths)?;
        }
        Commands::Backup(cmd) => {
            handle_backup_command(&storage, &settings, cmd)?;
            settings = Settings::load_or_create(&paths)?;
        }
        Commands::Sync(cmd) => handle_sync_command(&storage, &settings, cmd)?,
        Commands::Settings(cmd) => handle_settings_command(&paths, &mut settings, cmd)?,
        Commands::Reset { confirm } => {
            let count = storage.records()?.record_count();
            if !confirm {
                println!("WARNING: This deletes all {} record(s).", count);
                println!("Settings are kept. Take a backup first with 'sitebook backup create'.");
                println!("To proceed, run again with --confirm:");
                println!("  sitebook reset --confirm");
                return Ok(());
            }
            let removed = DataService::new(&storage).reset_all()?;
            println!("Deleted {} record(s).", removed);
        }
        Commands::Audit { limit } => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("Audit log is empty.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Commands::Config => {
            println!("Sitebook Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Project: {}", settings.project_name);
            println!(
                "Sync:    {}",
                if settings.sync_url().is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
        }
    }

    if sync_after {
        sitebook::cli::sync::auto_sync(&storage, &settings);
    }

    Ok(())
}
