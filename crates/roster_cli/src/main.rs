//! Console entry point for the contact book.
//!
//! # Responsibility
//! - Resolve configuration and optional file logging.
//! - Open the snapshot database and hand stdin/stdout to the console loop.

mod console;

use console::Console;
use log::{error, info};
use roster_core::{
    init_optional_logging, open_db, AppConfig, ContactService, SqlitePersonRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("roster: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    init_optional_logging(&config.log_level, config.log_dir.as_deref())?;
    info!(
        "event=cli_start module=cli status=ok version={} rule={}",
        roster_core::core_version(),
        config.category_rule.name()
    );

    let mut conn = open_db(&config.db_path)?;
    let repo = SqlitePersonRepository::try_new(&mut conn)?;
    let mut service = ContactService::open(repo, config.category_rule)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Console::new(stdin.lock(), stdout.lock()).run(&mut service)?;
    Ok(())
}
