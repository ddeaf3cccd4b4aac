//! Command-line front end for the ship maintenance core.
//!
//! Mutating commands require an Admin session created with `login`.

mod cli;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate, Utc};
use cli::{Cli, Commands, ComponentCommand, ComponentFields, JobCommand, NotificationCommand, ShipCommand};
use log::{info, warn};
use shipmaint_core::calendar::{days_in_month, jobs_in_month};
use shipmaint_core::db::open_db;
use shipmaint_core::dashboard::percentage;
use shipmaint_core::{
    calculate_dashboard_stats, format_relative, init_logging, seed_sample_data, AppConfig,
    AuthService, Component, ComponentService, ComponentView, ConfigOverrides, FleetService, Job,
    JobPriority, JobService, NotificationService, Ship, SqliteKeyValueStore, UserRole, JOB_TYPES,
};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let config = AppConfig::resolve(ConfigOverrides {
        db_path: cli.db.clone(),
        log_dir: cli.log_dir.clone(),
        log_level: cli.log_level.clone(),
    })
    .map_err(|err| anyhow!(err))
    .context("invalid configuration")?;

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open store {}", config.db_path.display()))?;
    let store = SqliteKeyValueStore::new(&conn);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    info!(
        "event=cli_command module=cli status=start db_path={}",
        config.db_path.display()
    );
    run(cli.command, &store, today)
}

fn run(command: Commands, store: &SqliteKeyValueStore<'_>, today: NaiveDate) -> Result<()> {
    match command {
        Commands::Seed => {
            let report = seed_sample_data(store)?;
            if report.seeded.is_empty() {
                println!("All keys already present; nothing seeded.");
            } else {
                let keys: Vec<_> = report.seeded.iter().map(|key| key.as_str()).collect();
                println!("Seeded: {}", keys.join(", "));
            }
        }

        Commands::Login { email, password } => {
            let user = AuthService::new(store).login(&email, &password)?;
            println!("Logged in as {} ({})", user.display_name(), user.role);
        }

        Commands::Logout => {
            AuthService::new(store).logout()?;
            println!("Logged out.");
        }

        Commands::Whoami => match AuthService::new(store).current_user()? {
            Some(user) => println!("{} <{}> {}", user.display_name(), user.email, user.role),
            None => println!("Not logged in."),
        },

        Commands::Dashboard { json } => {
            let stats = calculate_dashboard_stats(store, today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("Dashboard ({today})");
            println!("  Total ships:         {}", stats.total_ships);
            println!("  Overdue components:  {}", stats.overdue_components);
            println!("  Jobs in progress:    {}", stats.jobs_in_progress);
            println!("  Completed jobs:      {}", stats.jobs_completed);
            println!("Jobs by priority:");
            for priority in JobPriority::ALL {
                println!(
                    "  {:<8} {:>4} ({:.1}%)",
                    priority.as_str(),
                    stats.jobs_by_priority.get(priority),
                    stats.jobs_by_priority.percentage(priority)
                );
            }
            println!("Jobs by type:");
            for (job_type, count) in &stats.jobs_by_type {
                println!("  {job_type:<24} {count:>4}");
            }
            let health = stats.components_by_status;
            let total = health.total();
            println!("Components by status:");
            for (label, count) in [
                ("Active", health.active),
                ("Under Maintenance", health.under_maintenance),
                ("Needs Attention", health.needs_attention),
            ] {
                println!("  {label:<18} {count:>4} ({:.1}%)", percentage(count, total));
            }
        }

        Commands::Ship(command) => run_ship(command, store, today)?,
        Commands::Component(command) => run_component(command, store, today)?,
        Commands::Job(command) => run_job(command, store)?,

        Commands::Calendar { month } => {
            let (year, month) = parse_month(&month)?;
            let jobs = JobService::new(store).list_jobs()?;
            let grouped = jobs_in_month(&jobs, year, month)
                .ok_or_else(|| anyhow!("invalid month {year}-{month:02}"))?;
            let days = days_in_month(year, month).unwrap_or_default();
            println!("{year}-{month:02} ({days} days)");
            if grouped.is_empty() {
                println!("  No jobs scheduled.");
            }
            for (date, day_jobs) in grouped {
                for job in day_jobs {
                    println!(
                        "  {date}  [{}] {} - {}",
                        job.priority, job.component_name, job.description
                    );
                }
            }
        }

        Commands::Notifications(command) => run_notifications(command, store)?,

        Commands::Alerts => {
            let raised = ComponentService::new(store).raise_maintenance_alerts(today, Utc::now())?;
            println!("Raised {} maintenance alert(s).", raised.len());
            for alert in raised {
                println!("  {}", alert.message);
            }
        }
    }

    Ok(())
}

fn run_ship(command: ShipCommand, store: &SqliteKeyValueStore<'_>, today: NaiveDate) -> Result<()> {
    let fleet = FleetService::new(store);
    match command {
        ShipCommand::List => {
            let ships = fleet.list_ships()?;
            if ships.is_empty() {
                println!("No ships.");
            }
            for ship in ships {
                print_ship(&ship);
            }
        }

        ShipCommand::Show { id } => {
            let detail = fleet.ship_detail(&id, today)?;
            print_ship(&detail.ship);
            println!("Components:");
            if detail.components.is_empty() {
                println!("  No components installed on this ship.");
            }
            for view in &detail.components {
                print_component(view);
            }
            println!("Jobs:");
            if detail.jobs.is_empty() {
                println!("  No maintenance jobs found for this ship.");
            }
            for job in &detail.jobs {
                print_job(job);
            }
        }

        ShipCommand::Add {
            name,
            imo,
            flag,
            status,
        } => {
            require_admin(store)?;
            let ship = Ship {
                status,
                ..Ship::new(name, imo, flag)
            };
            let created = fleet.create_ship(&ship)?;
            println!("Ship created: {}", created.id);
        }

        ShipCommand::Edit {
            id,
            name,
            imo,
            flag,
            status,
        } => {
            require_admin(store)?;
            let mut ship = fleet
                .get_ship(&id)?
                .ok_or_else(|| anyhow!("ship not found: {id}"))?;
            if let Some(name) = name {
                ship.name = name;
            }
            if let Some(imo) = imo {
                ship.imo = imo;
            }
            if let Some(flag) = flag {
                ship.flag = flag;
            }
            if let Some(status) = status {
                ship.status = status;
            }
            fleet.update_ship(&ship)?;
            println!("Ship updated: {id}");
        }

        ShipCommand::Remove { id } => {
            require_admin(store)?;
            fleet.delete_ship(&id)?;
            println!("Ship removed: {id}");
        }
    }
    Ok(())
}

fn run_component(
    command: ComponentCommand,
    store: &SqliteKeyValueStore<'_>,
    today: NaiveDate,
) -> Result<()> {
    let service = ComponentService::new(store);
    match command {
        ComponentCommand::List { ship_id } => {
            let views = service.list_for_ship(&ship_id, today)?;
            if views.is_empty() {
                println!("No components installed on this ship.");
            }
            for view in &views {
                print_component(view);
            }
        }

        ComponentCommand::Add { ship, fields } => {
            require_admin(store)?;
            let ComponentFields {
                name,
                serial,
                installed,
                last_maintenance,
            } = fields;
            let component = Component::new(
                ship,
                name.unwrap_or_default(),
                serial.unwrap_or_default(),
                installed.context("--installed is required")?,
                last_maintenance.context("--last-maintenance is required")?,
            );
            let created = service.create_component(&component)?;
            println!("Component created: {}", created.id);
        }

        ComponentCommand::Edit { id, fields } => {
            require_admin(store)?;
            let mut component = service
                .get_component(&id)?
                .ok_or_else(|| anyhow!("component not found: {id}"))?;
            if let Some(name) = fields.name {
                component.name = name;
            }
            if let Some(serial) = fields.serial {
                component.serial_number = serial;
            }
            if let Some(installed) = fields.installed {
                component.install_date = installed;
            }
            if let Some(last) = fields.last_maintenance {
                component.last_maintenance_date = last;
            }
            service.update_component(&component)?;
            println!("Component updated: {id}");
        }

        ComponentCommand::Remove { id } => {
            require_admin(store)?;
            service.delete_component(&id)?;
            println!("Component removed: {id}");
        }
    }
    Ok(())
}

fn run_job(command: JobCommand, store: &SqliteKeyValueStore<'_>) -> Result<()> {
    let service = JobService::new(store);
    match command {
        JobCommand::List { ship } => {
            let jobs = match ship {
                Some(ship_id) => service.list_for_ship(&ship_id)?,
                None => service.list_jobs()?,
            };
            if jobs.is_empty() {
                println!("No maintenance jobs found.");
            }
            for job in &jobs {
                print_job(job);
            }
        }

        JobCommand::Add {
            ship,
            component,
            engineer,
            date,
            description,
            priority,
            job_type,
            kind,
        } => {
            require_admin(store)?;
            if !JOB_TYPES.contains(&job_type.as_str()) {
                warn!("event=job_add module=cli status=warn error_code=nonstandard_job_type");
            }
            let job = Job {
                assigned_engineer_id: engineer,
                priority,
                job_type,
                kind,
                ..Job::new(ship, component, date, description)
            };
            let created = service.create_job(&job, Utc::now())?;
            println!("Job created: {}", created.id);
        }

        JobCommand::Status { id, status } => {
            require_admin(store)?;
            let job = service.set_status(&id, status, Utc::now())?;
            println!("Job {} is now {}", job.id, job.status);
        }

        JobCommand::Remove { id } => {
            require_admin(store)?;
            service.delete_job(&id)?;
            println!("Job removed: {id}");
        }

        JobCommand::Options => {
            println!("Job types:");
            for job_type in JOB_TYPES {
                println!("  {job_type}");
            }
            println!("Assignable engineers:");
            for user in service.assignable_engineers()? {
                println!("  {:<6} {} ({})", user.id, user.display_name(), user.role);
            }
        }
    }
    Ok(())
}

fn run_notifications(command: NotificationCommand, store: &SqliteKeyValueStore<'_>) -> Result<()> {
    let service = NotificationService::new(store);
    match command {
        NotificationCommand::List => {
            let now = Utc::now();
            let notifications = service.list()?;
            println!("{} unread", service.unread_count()?);
            for notification in notifications {
                let marker = if notification.is_read { ' ' } else { '*' };
                println!(
                    "{marker} {:<38} [{}] {}: {} ({})",
                    notification.id,
                    notification.kind.as_str(),
                    notification.title,
                    notification.message,
                    format_relative(notification.timestamp, now)
                );
            }
        }
        NotificationCommand::Read { id } => {
            service.mark_as_read(&id)?;
            println!("Marked as read: {id}");
        }
        NotificationCommand::ReadAll => {
            let changed = service.mark_all_as_read()?;
            println!("Marked {changed} notification(s) as read.");
        }
        NotificationCommand::Remove { id } => {
            service.remove(&id)?;
            println!("Removed: {id}");
        }
        NotificationCommand::Clear => {
            service.clear_all()?;
            println!("Notifications cleared.");
        }
    }
    Ok(())
}

fn require_admin(store: &SqliteKeyValueStore<'_>) -> Result<()> {
    AuthService::new(store)
        .require_role(UserRole::Admin)
        .context("this command requires an Admin login")?;
    Ok(())
}

fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let Some((year, month)) = raw.trim().split_once('-') else {
        bail!("month must be YYYY-MM, got `{raw}`");
    };
    let year = year.parse().with_context(|| format!("invalid year in `{raw}`"))?;
    let month = month.parse().with_context(|| format!("invalid month in `{raw}`"))?;
    Ok((year, month))
}

fn print_ship(ship: &Ship) {
    println!(
        "{:<34} {:<20} IMO {} {:<12} {}",
        ship.id, ship.name, ship.imo, ship.flag, ship.status
    );
}

fn print_component(view: &ComponentView) {
    let component = &view.component;
    println!(
        "  {:<34} {:<20} {:<12} installed {} last serviced {} [{}]",
        component.id,
        component.name,
        component.serial_number,
        component.install_date,
        component.last_maintenance_date,
        view.maintenance_status
    );
}

fn print_job(job: &Job) {
    println!(
        "  {:<34} {} {:<22} {:<6} {:<11} {} {} -> {}",
        job.id,
        job.scheduled_date,
        job.type_bucket(),
        job.priority.as_str(),
        job.status.as_str(),
        job.component_name,
        job.description,
        job.assigned_engineer_name
    );
}
