#![warn(clippy::pedantic)]

pub mod preferences;
pub mod session;

use anyhow::Result as AnyResult;
use std::io::{BufRead, Write};

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    let (preferences, failed_to_load) = preferences::Preferences::load_or_default();
    // Write defaults back so the user has a file to edit, unless that would clobber one we couldn't read.
    if !failed_to_load {
        if let Err(e) = preferences.save() {
            log::warn!("Failed to save preferences:\n{e:?}");
        }
    }
    log::info!(
        "Starting session with history capacity {}",
        preferences.history_capacity
    );

    let mut session = session::Session::new(preferences.history_capacity);
    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    if has_term {
        writeln!(stdout, "{}", session::HELP)?;
    }

    for line in stdin.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<session::SessionCommand>() {
            Ok(command) => {
                if !session.apply(command, &mut stdout)? {
                    break;
                }
            }
            Err(e) => writeln!(stdout, "{e}")?,
        }
        stdout.flush()?;
    }

    log::info!("Session ended with {} objects", session.scene().len());
    Ok(())
}
