//! `checkdesk` - single-desk offline check-in kiosk
//!
//! This binary wires the roster, the check-in log and the lookup workflow to
//! a line-oriented foreground shell and a handful of reporting commands.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{error, warn};

use checkdesk::cli::{Cli, Command, ConfigCommand, ExportCommand, LogCommand, RunCommand};
use checkdesk::workflow::{Desk, Submission};
use checkdesk::{export, init_logging, CheckinLog, Config, Error, Roster};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Run(cmd) => handle_run(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Log(cmd) => handle_log(&config, &cmd),
        Command::Export(cmd) => handle_export(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_run(config: &Config, cmd: &RunCommand) -> anyhow::Result<()> {
    let cooldown = match cmd.cooldown_secs {
        Some(0) => {
            return Err(Error::ConfigValidation {
                message: "--cooldown-secs must be at least 1".to_string(),
            }
            .into())
        }
        Some(secs) => Duration::from_secs(secs),
        None => config.cooldown(),
    };

    // Deployment convention: the photo directory sits next to the roster.
    let photo_dir = config.photo_dir();
    if !photo_dir.exists() {
        std::fs::create_dir_all(&photo_dir).map_err(|source| Error::DirectoryCreate {
            path: photo_dir.clone(),
            source,
        })?;
    }

    let roster = Roster::load(config.roster_path())?;
    if roster.is_empty() {
        warn!(
            "roster at {} is empty; every lookup will be rejected",
            config.roster_path().display()
        );
    }
    let log = CheckinLog::open(config.database_path())?;

    let mut desk = Desk::new(roster, log, cooldown);

    println!("checkdesk listo. Escriba un DNI y presione Enter (Ctrl-D para salir).");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read operator input")?;
        match desk.submit(&line) {
            Ok(Submission::CheckedIn(card)) => {
                println!();
                println!("{card}");
                println!();
            }
            Ok(Submission::NotFound { dni }) => {
                println!("DNI no registrado: {dni}");
            }
            Ok(Submission::Cleared) => {
                println!("(listo para el siguiente check-in)");
            }
            Ok(Submission::CoolingDown | Submission::Empty) => {}
            // A storage failure aborts this check-in only; nothing was
            // logged and the desk stays usable.
            Err(e) => error!("check-in failed, nothing was recorded: {e}"),
        }
    }

    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let roster = Roster::load(config.roster_path())?;
    let log = CheckinLog::open(config.database_path())?;
    let stats = log.stats()?;

    let fmt_ts = |ts: Option<chrono::NaiveDateTime>| {
        ts.map(|t| t.format(checkdesk::TIMESTAMP_FORMAT).to_string())
    };

    if json {
        let status = serde_json::json!({
            "roster_path": config.roster_path(),
            "participants": roster.len(),
            "database_path": config.database_path(),
            "total_checkins": stats.total_events,
            "first_checkin": fmt_ts(stats.first_checkin),
            "last_checkin": fmt_ts(stats.last_checkin),
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("checkdesk status");
        println!("----------------");
        println!("Roster:        {}", config.roster_path().display());
        println!("Participants:  {}", roster.len());
        println!("Database:      {}", config.database_path().display());
        println!("Check-ins:     {}", stats.total_events);
        if let Some(first) = fmt_ts(stats.first_checkin) {
            println!("First:         {first}");
        }
        if let Some(last) = fmt_ts(stats.last_checkin) {
            println!("Last:          {last}");
        }
    }
    Ok(())
}

fn handle_log(config: &Config, cmd: &LogCommand) -> anyhow::Result<()> {
    let log = CheckinLog::open(config.database_path())?;

    let events = match &cmd.dni {
        Some(dni) => log.by_dni(dni, cmd.last)?,
        None => log.recent(cmd.last)?,
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else if events.is_empty() {
        println!("No check-ins recorded.");
    } else {
        for event in &events {
            println!("{}  {:<12}  {}", event.timestamp_str(), event.dni, event.nombre);
        }
    }
    Ok(())
}

fn handle_export(config: &Config, cmd: &ExportCommand) -> anyhow::Result<()> {
    let log = CheckinLog::open(config.database_path())?;
    let events = log.all()?;

    export::write_file(&events, &cmd.output)?;
    println!(
        "Exported {} check-ins to {}",
        events.len(),
        cmd.output.display()
    );
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[roster]");
                println!("  Path:           {}", config.roster_path().display());
                println!();
                println!("[storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[kiosk]");
                println!("  Cooldown (s):   {}", config.kiosk.cooldown_secs);
                println!("  Photo dir:      {}", config.photo_dir().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
