//! CLI smoke entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, and open the store.
//! - Print the core version and today's navigation counters.

use log::info;
use std::process::ExitCode;
use todoapp_core::db::open_db;
use todoapp_core::{core_version, init_logging, AppConfig, DayWindow, NoopInvalidator, TodoActions};

fn main() -> ExitCode {
    let config = AppConfig::from_env();
    if let Err(err) = init_logging(&config.logging) {
        eprintln!("todoapp: logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("todoapp: cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let actions = TodoActions::new(&conn, NoopInvalidator);
    let counts = actions.nav_counts(&DayWindow::today());
    println!("todoapp_core version={}", core_version());
    println!(
        "all={} today={} upcoming={} completed={} lists={}",
        counts.all,
        counts.today,
        counts.upcoming,
        counts.completed,
        actions.get_lists().len()
    );
    ExitCode::SUCCESS
}
