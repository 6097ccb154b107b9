pub mod ui;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::application::{BillService, DueSummary};
use crate::config::AppConfig;
use crate::domain::{
    BillDraft, BillId, BillStatus, DateRange, format_user_date, parse_amount, parse_user_date,
};
use crate::io::{ExportFormat, Exporter};

/// Payables - Bills Payable Tracker
#[derive(Parser)]
#[command(name = "payables")]
#[command(about = "A local-first tracker for recurring and one-off bills")]
#[command(version)]
pub struct Cli {
    /// Database file path (overrides the config file)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Path to an optional configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Add a bill; monthly and annual bills create one row per occurrence
    Add {
        /// Bill name
        name: String,

        /// Amount (e.g., "89.90", "89,90" or "89")
        amount: String,

        /// Due date (DD/MM/YYYY)
        #[arg(long)]
        due: String,

        /// Recurrence: single, monthly (12 bills, 30 days apart), annual (5 bills)
        #[arg(short, long, default_value = "single")]
        recurrence: String,
    },

    /// List bills, color-coded by due date
    List {
        /// Only bills due on or after this date (DD/MM/YYYY)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Only bills due on or before this date (DD/MM/YYYY)
        #[arg(long, requires = "from")]
        to: Option<String>,
    },

    /// Show a single bill
    Show {
        /// Bill ID
        id: BillId,
    },

    /// Edit a bill; omitted fields keep their current value
    Edit {
        /// Bill ID
        id: BillId,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,

        /// New due date (DD/MM/YYYY)
        #[arg(long)]
        due: Option<String>,

        /// New recurrence tag: single, monthly, annual
        #[arg(short, long)]
        recurrence: Option<String>,
    },

    /// Delete a bill
    Delete {
        /// Bill ID
        id: BillId,
    },

    /// Mark a bill as paid
    Pay {
        /// Bill ID
        id: BillId,
    },

    /// Mark a bill as pending again
    Unpay {
        /// Bill ID
        id: BillId,
    },

    /// Switch a bill between pending and paid
    Toggle {
        /// Bill ID
        id: BillId,
    },

    /// Export bills to a CSV spreadsheet or a JSON file (no Excel .xlsx output)
    Export {
        /// Output file
        path: PathBuf,

        /// Only bills due on or after this date (DD/MM/YYYY)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Only bills due on or before this date (DD/MM/YYYY)
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// Format: csv, json (default: from the file extension, else csv)
        #[arg(short, long)]
        format: Option<String>,
    },
}

impl Cli {
    fn database_path(&self, config: &AppConfig) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => config.resolve_database_path(),
        }
    }

    pub async fn run(self) -> Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;
        let database = self.database_path(&config)?;
        let database = database.to_string_lossy().into_owned();
        debug!(%database, "Using database");

        let service = match self.command {
            Commands::Init => {
                let service = BillService::init(&database).await?;
                println!("Database initialized: {}", database);
                service
            }
            _ => BillService::connect(&database).await.with_context(|| {
                format!(
                    "Failed to open database '{}'. Run 'payables init' first",
                    database
                )
            })?,
        };

        let today = Local::now().date_naive();
        let result = run_command(&service, self.command, &config, today).await;
        service.close().await;
        result
    }
}

async fn run_command(
    service: &BillService,
    command: Commands,
    config: &AppConfig,
    today: NaiveDate,
) -> Result<()> {
    let currency = config.currency_symbol.as_str();

    match command {
        Commands::Init => {}

        Commands::Add {
            name,
            amount,
            due,
            recurrence,
        } => {
            let draft = BillDraft::parse(&name, &amount, &due, &recurrence)?;
            let bills = service.add_bill(&draft).await?;

            println!(
                "Added {} bill(s): {} {} ({})",
                bills.len(),
                draft.name,
                ui::format_amount(draft.amount_cents, currency),
                draft.recurrence
            );
            if let (Some(first), Some(last)) = (bills.first(), bills.last()) {
                if bills.len() > 1 {
                    println!(
                        "  Due from {} to {} (IDs {}-{})",
                        format_user_date(first.due_date),
                        format_user_date(last.due_date),
                        first.id,
                        last.id
                    );
                } else {
                    println!(
                        "  Due {} (ID {})",
                        format_user_date(first.due_date),
                        first.id
                    );
                }
            }
        }

        Commands::List { from, to } => {
            let range = parse_range(from.as_deref(), to.as_deref())?;
            let bills = service.list_bills(range).await?;

            if bills.is_empty() {
                println!("No bills found.");
            } else {
                if let Some(range) = range {
                    println!(
                        "{}\n",
                        ui::style_text(
                            &format!(
                                "Bills due {} - {}",
                                format_user_date(range.start),
                                format_user_date(range.end)
                            ),
                            ui::StyleType::Title
                        )
                    );
                }
                println!("{}", ui::bills_table(&bills, today, currency));
                println!();
                for line in ui::summary_lines(&DueSummary::from_bills(&bills, today), currency) {
                    println!("{}", line);
                }
            }
        }

        Commands::Show { id } => {
            let bill = service.get_bill(id).await?;
            let state = bill.due_state(today);

            println!("Bill: {}", bill.name);
            println!("  ID:         {}", bill.id);
            println!(
                "  Amount:     {}",
                ui::format_amount(bill.amount_cents, currency)
            );
            println!("  Due:        {}", format_user_date(bill.due_date));
            println!("  Recurrence: {}", bill.recurrence);
            println!("  Status:     {}", bill.status);
            println!(
                "  State:      {}",
                ui::style_text(state.as_str(), ui::StyleType::Subtle)
            );
        }

        Commands::Edit {
            id,
            name,
            amount,
            due,
            recurrence,
        } => {
            let current = service.get_bill(id).await?;

            let amount_cents = match amount {
                Some(a) => parse_amount(&a)?,
                None => current.amount_cents,
            };
            let due_date = match due {
                Some(d) => parse_user_date(&d)?,
                None => current.due_date,
            };
            let recurrence = match recurrence {
                Some(r) => r.parse()?,
                None => current.recurrence,
            };
            let draft = BillDraft::new(
                name.unwrap_or(current.name),
                amount_cents,
                due_date,
                recurrence,
            )?;

            let bill = service.edit_bill(id, &draft).await?;
            println!(
                "Updated bill {}: {} {} due {}",
                bill.id,
                bill.name,
                ui::format_amount(bill.amount_cents, currency),
                format_user_date(bill.due_date)
            );
        }

        Commands::Delete { id } => {
            if service.delete_bill(id).await? {
                println!("Deleted bill: {}", id);
            } else {
                println!("No bill with ID {}; nothing deleted.", id);
            }
        }

        Commands::Pay { id } => {
            let bill = service.set_status(id, BillStatus::Paid).await?;
            println!("Marked as paid: {} ({})", bill.name, bill.id);
        }

        Commands::Unpay { id } => {
            let bill = service.set_status(id, BillStatus::Pending).await?;
            println!("Marked as pending: {} ({})", bill.name, bill.id);
        }

        Commands::Toggle { id } => {
            let status = service.toggle_status(id).await?;
            println!("Bill {} is now {}", id, status);
        }

        Commands::Export {
            path,
            from,
            to,
            format,
        } => {
            let range = parse_range(from.as_deref(), to.as_deref())?;
            let format = match format {
                Some(f) => f.parse::<ExportFormat>()?,
                None => ExportFormat::from_path(&path),
            };

            let bills = service.list_bills(range).await?;
            let count = Exporter::new(&bills).to_path(&path, format)?;
            println!("Exported {} bill(s) to {}", count, path.display());
        }
    }

    Ok(())
}

/// Both bounds or neither; clap enforces that they come together.
fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<Option<DateRange>> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Some(DateRange::parse(from, to)?)),
        (None, None) => Ok(None),
        _ => anyhow::bail!("Both --from and --to are required to filter by date"),
    }
}
