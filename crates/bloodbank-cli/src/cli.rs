use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use bloodbank_core::VERSION;

/// Blood Bank - stock ledger, donations, requests and audit log for a blood bank
#[derive(Parser)]
#[command(name = "bloodbank")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the data file
    #[arg(short, long, global = true, env = "BLOODBANK_DATA")]
    pub data: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, env = "BLOODBANK_CONFIG")]
    pub config: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase diagnostic output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Identity flags shared by donors, patients and staff
#[derive(Args, Debug, Default, Clone)]
pub struct IdentityArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Age in years (18-65)
    #[arg(long)]
    pub age: Option<u32>,

    /// Numeric ID
    #[arg(long)]
    pub id: Option<u64>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
}

/// Arguments for the `donate` command
#[derive(Args)]
pub struct DonateArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Donated amount in ml (50-500)
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<i64>,

    /// Donation date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Blood type (A+, A-, B+, B-, AB+, AB-, O+, O-)
    #[arg(long = "blood-type", value_name = "TYPE", allow_hyphen_values = true)]
    pub blood_type: Option<String>,

    /// Donor reports a chronic condition (donation will be refused)
    #[arg(long)]
    pub chronic_condition: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `request` command
#[derive(Args)]
pub struct RequestArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Required amount in ml
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<i64>,

    /// Patient blood type
    #[arg(long = "blood-type", value_name = "TYPE", allow_hyphen_values = true)]
    pub blood_type: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `staff` command
#[derive(Args)]
pub struct StaffArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `inventory` command
#[derive(Args)]
pub struct InventoryArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `alerts` command
#[derive(Args)]
pub struct AlertsArgs {
    /// Critical threshold in ml (overrides config)
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `stock add` and `stock remove`
#[derive(Args)]
pub struct StockAdjustArgs {
    /// Blood type (A+, A-, B+, B-, AB+, AB-, O+, O-)
    #[arg(long = "blood-type", value_name = "TYPE", allow_hyphen_values = true)]
    pub blood_type: String,

    /// Amount in ml
    #[arg(long, allow_hyphen_values = true)]
    pub amount: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum StockSubcommand {
    /// Add stock without a donation record
    Add(StockAdjustArgs),

    /// Remove stock without a request record
    Remove(StockAdjustArgs),
}

/// Arguments for the `compatibility` command
#[derive(Args)]
pub struct CompatibilityArgs {
    /// Patient blood type
    #[arg(value_name = "TYPE", allow_hyphen_values = true)]
    pub blood_type: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Collection to search (donors, patients)
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Name fragment, numeric ID, or blood type
    #[arg(value_name = "TERM", allow_hyphen_values = true)]
    pub term: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `history` command
#[derive(Args)]
pub struct HistoryArgs {
    /// Collection to show (donors, patients)
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `report` command
#[derive(Args)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `logs` command
#[derive(Args)]
pub struct LogsArgs {
    /// Show only the last N entries (0 shows all)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data file with default stock
    Init,

    /// Show stock for every blood type
    Inventory(InventoryArgs),

    /// Show blood types below the critical threshold
    Alerts(AlertsArgs),

    /// Manually adjust stock for one blood type
    #[command(subcommand)]
    Stock(StockSubcommand),

    /// Register a donor and record a donation
    Donate(DonateArgs),

    /// Register a patient and fulfil a blood request
    Request(RequestArgs),

    /// Show which donor types a patient can receive from
    Compatibility(CompatibilityArgs),

    /// Register a staff member in the audit log
    Staff(StaffArgs),

    /// Search donor or patient records
    Search(SearchArgs),

    /// Show donor or patient transaction history
    History(HistoryArgs),

    /// Generate donation, request and inventory reports
    Report(ReportArgs),

    /// Show the audit log
    Logs(LogsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
