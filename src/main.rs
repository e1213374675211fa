use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tickdash::aggregate::{self, Column};
use tickdash::config::{self, DisplayConfig};
use tickdash::enrich::{enrich, EnrichedTicket};
use tickdash::filter::{self, Selections};
use tickdash::load;
use tickdash::output::{chart, json as json_out, table};

#[derive(Parser)]
#[command(name = "tickdash", version, about = "Ticket Dashboard — filter, search, and trend analytics over helpdesk JSON exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Keep tickets with this status (repeatable)
    #[arg(long)]
    status: Vec<String>,

    /// Keep tickets with this priority (repeatable)
    #[arg(long)]
    priority: Vec<String>,

    /// Keep tickets in this category (repeatable)
    #[arg(long)]
    category: Vec<String>,

    /// Keep tickets assigned to this admin, by full name (repeatable)
    #[arg(long)]
    assignee: Vec<String>,

    /// Case-insensitive substring match over summary and description
    #[arg(long)]
    search: Option<String>,
}

impl From<FilterArgs> for Selections {
    fn from(args: FilterArgs) -> Self {
        Selections {
            status: args.status,
            priority: args.priority,
            category: args.category,
            assignee: args.assignee,
            search: args.search,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Filtered ticket table plus status/category/assignee distributions
    Dashboard {
        /// Path to the JSON export ("-" for stdin)
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum ticket rows to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Daily and monthly creation trends over the full export
    Trend {
        /// Path to the JSON export ("-" for stdin)
        file: PathBuf,

        /// Range start, YYYY-MM-DD (default: earliest creation date)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Range end, YYYY-MM-DD (default: latest creation date)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Filtered ticket table only
    List {
        /// Path to the JSON export ("-" for stdin)
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum ticket rows to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Row counts and date span for an export
    Info {
        /// Path to the JSON export ("-" for stdin)
        file: PathBuf,
    },

    /// Show the config file path and current values
    Config {
        /// Write a commented template if no config exists yet
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let json_output = cli.json;
    let cfg = DisplayConfig::load()?;

    match cli.command {
        Commands::Dashboard { file, filters, limit } => {
            let tickets = load_tickets(&file)?;
            let selections: Selections = filters.into();
            let filtered = filter::apply(&tickets, &selections);

            let status = aggregate::frequency(&filtered, Column::Status);
            let category = aggregate::frequency(&filtered, Column::Category);
            let assignees = aggregate::frequency(&filtered, Column::Assignee);

            if json_output {
                json_out::print_json(&serde_json::json!({
                    "total": tickets.len(),
                    "matched": filtered.len(),
                    "tickets": filtered,
                    "status": status,
                    "category": category,
                    "assignees": assignees,
                }))?;
            } else {
                table::print_ticket_list(
                    &filtered,
                    &cfg.missing_label,
                    limit.unwrap_or(cfg.row_limit),
                );

                println!("Tickets by status\n");
                chart::print_frequency_bars(&status, cfg.chart_width);
                table::print_frequency_table("status", &status);

                println!("Tickets by category\n");
                chart::print_frequency_bars(&category, cfg.chart_width);
                table::print_frequency_table("category", &category);

                println!("Tickets by assignee\n");
                chart::print_frequency_bars(&assignees, cfg.chart_width);
                table::print_frequency_table("assignee", &assignees);
            }
        }

        Commands::Trend { file, from, to } => {
            // Deliberately unfiltered: the trend view always runs over
            // the full export, restricted only by the date range.
            let tickets = load_tickets(&file)?;

            let Some((min, max)) = aggregate::date_bounds(&tickets) else {
                if json_output {
                    json_out::print_json(&serde_json::json!({
                        "daily": [],
                        "monthly": [],
                        "total": 0,
                    }))?;
                } else {
                    println!("No tickets to trend.");
                }
                return Ok(());
            };

            let start = from.unwrap_or(min);
            let end = to.unwrap_or(max);
            let daily = aggregate::daily_trend(&tickets, start, end);
            let monthly = aggregate::monthly_trend(&tickets);

            if json_output {
                json_out::print_json(&serde_json::json!({
                    "from": start,
                    "to": end,
                    "daily": daily,
                    "monthly": monthly,
                    "total": aggregate::monthly_total(&monthly),
                }))?;
            } else {
                println!("Daily ticket creation ({start} to {end})\n");
                chart::print_daily_bars(&daily, cfg.chart_width);

                println!("Monthly ticket creation\n");
                chart::print_monthly_bars(&monthly, cfg.chart_width);

                println!("Tickets created per month\n");
                table::print_monthly_table(&monthly);
            }
        }

        Commands::List { file, filters, limit } => {
            let tickets = load_tickets(&file)?;
            let selections: Selections = filters.into();
            let filtered = filter::apply(&tickets, &selections);

            if json_output {
                json_out::print_json(&serde_json::json!({
                    "total": tickets.len(),
                    "matched": filtered.len(),
                    "tickets": filtered,
                }))?;
            } else {
                table::print_ticket_list(
                    &filtered,
                    &cfg.missing_label,
                    limit.unwrap_or(cfg.row_limit),
                );
            }
        }

        Commands::Info { file } => {
            let export = load_export(&file)?;
            let tickets = enrich(&export)?;
            let admins = export.users.iter().filter(|u| u.role == "admin").count();
            let named = tickets.iter().filter(|t| t.assigned_name.is_some()).count();
            let bounds = aggregate::date_bounds(&tickets);

            if json_output {
                json_out::print_json(&serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "tickets": tickets.len(),
                    "users": export.users.len(),
                    "admins": admins,
                    "with_assignee": named,
                    "earliest": bounds.map(|(min, _)| min),
                    "latest": bounds.map(|(_, max)| max),
                }))?;
            } else {
                println!("tickdash v{}", env!("CARGO_PKG_VERSION"));
                println!("  Tickets:       {}", tickets.len());
                println!("  Users:         {} ({} admins)", export.users.len(), admins);
                println!("  With assignee: {named}");
                match bounds {
                    Some((min, max)) => println!("  Date span:     {min} to {max}"),
                    None => println!("  Date span:     (empty)"),
                }
            }
        }

        Commands::Config { init } => {
            if init {
                if config::init_config()? {
                    println!("Wrote {}", config::config_path()?.display());
                } else {
                    println!("Config already exists: {}", config::config_path()?.display());
                }
            }

            if json_output {
                json_out::print_json(&cfg)?;
            } else {
                println!("Config: {}", config::config_path()?.display());
                println!("  chart_width   = {}", cfg.chart_width);
                println!("  row_limit     = {}", cfg.row_limit);
                println!("  missing_label = \"{}\"", cfg.missing_label);
            }
        }
    }

    Ok(())
}

/// Load an export from a path ("-" means stdin).
fn load_export(path: &Path) -> Result<load::Export> {
    let export = if path.as_os_str() == "-" {
        load::load_stdin()?
    } else {
        load::load_file(path)?
    };
    Ok(export)
}

/// Load and enrich in one step for the commands that only need rows.
fn load_tickets(path: &Path) -> Result<Vec<EnrichedTicket>> {
    let export = load_export(path)?;
    Ok(enrich(&export)?)
}
