use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shipmaint_core::model::date::parse_date;
use shipmaint_core::{JobPriority, JobStatus, ShipStatus};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shipmaint")]
#[command(version, about = "Track ships, components and maintenance jobs")]
pub struct Cli {
    /// Store file (defaults to $SHIPMAINT_DB_PATH, then the temp dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Absolute log directory (defaults to $SHIPMAINT_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults to $SHIPMAINT_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Evaluate maintenance status as of this date instead of today
    #[arg(long, global = true, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install sample ships, components, jobs and users into empty keys
    Seed,

    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show KPI counts
    Dashboard {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage ships
    #[command(subcommand)]
    Ship(ShipCommand),

    /// Manage installed components
    #[command(subcommand)]
    Component(ComponentCommand),

    /// Manage maintenance jobs
    #[command(subcommand)]
    Job(JobCommand),

    /// List jobs scheduled in one month
    Calendar {
        /// Month as YYYY-MM
        #[arg(long)]
        month: String,
    },

    /// Read and manage notifications
    #[command(subcommand)]
    Notifications(NotificationCommand),

    /// Raise notifications for overdue components
    Alerts,
}

#[derive(Subcommand, Debug)]
pub enum ShipCommand {
    List,
    /// Show one ship with its components and jobs
    Show { id: String },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        imo: String,
        #[arg(long)]
        flag: String,
        #[arg(long, default_value = "Active")]
        status: ShipStatus,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        imo: Option<String>,
        #[arg(long)]
        flag: Option<String>,
        #[arg(long)]
        status: Option<ShipStatus>,
    },
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ComponentCommand {
    /// List components of one ship
    List { ship_id: String },
    Add {
        #[arg(long)]
        ship: String,
        #[command(flatten)]
        fields: ComponentFields,
    },
    Edit {
        id: String,
        #[command(flatten)]
        fields: ComponentFields,
    },
    Remove { id: String },
}

#[derive(Args, Debug)]
pub struct ComponentFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub serial: Option<String>,
    #[arg(long, value_parser = parse_date)]
    pub installed: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    pub last_maintenance: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    List {
        /// Only jobs for this ship
        #[arg(long)]
        ship: Option<String>,
    },
    Add {
        #[arg(long)]
        ship: String,
        #[arg(long)]
        component: String,
        /// Assigned engineer or inspector user id
        #[arg(long)]
        engineer: String,
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "Medium")]
        priority: JobPriority,
        /// One of the standard job types
        #[arg(long, default_value = "Routine Inspection")]
        job_type: String,
        /// Short free-form label
        #[arg(long = "type", default_value = "")]
        kind: String,
    },
    /// Change the status of one job
    Status { id: String, status: JobStatus },
    Remove { id: String },
    /// List standard job types and assignable engineers
    Options,
}

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    List,
    Read { id: String },
    ReadAll,
    Remove { id: String },
    Clear,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
