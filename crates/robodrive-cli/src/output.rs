//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use robodrive_core::{ControllerStats, TickOutput};
use serde_json::json;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print success message
pub fn print_success(message: &str, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "message": message
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format message as JSON: {e}"),
        }
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print the per-tick commands and the race statistics of a replay
pub fn print_replay(outputs: &[TickOutput], stats: &ControllerStats, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "ticks": outputs,
            "stats": stats,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format replay as JSON: {e}"),
        }
        return;
    }

    println!(
        "{:>6}  {:>7}  {:>4}  {:>7}  {:>5}  {:>5}  {:>8}  {:>7}",
        "tick".bold(),
        "steer".bold(),
        "gear".bold(),
        "clutch".bold(),
        "brake".bold(),
        "accel".bold(),
        "speed".bold(),
        "angle".bold()
    );
    for (tick, out) in outputs.iter().enumerate() {
        let line = format!(
            "{:>6}  {:>7.4}  {:>4}  {:>7.4}  {:>5.3}  {:>5.3}  {:>8.3}  {:>7.4}",
            tick,
            out.command.steer,
            out.command.gear.to_string(),
            out.command.clutch,
            out.command.brake,
            out.command.accel,
            out.report.speed,
            out.report.angle
        );
        if out.stuck {
            println!("{}  {}", line, "STUCK".red().bold());
        } else if out.report.end_of_episode {
            println!("{}  {}", line, "END".yellow());
        } else {
            println!("{line}");
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  Ticks:      {}", stats.ticks);
    println!("  Upshifts:   {}", stats.upshifts);
    println!("  Downshifts: {}", stats.downshifts);
    println!(
        "  Reverse:    {} engaged, {} released",
        stats.reverse_engagements, stats.reverse_releases
    );
    println!("  Stuck:      {:.1}% of ticks", stats.stuck_percent());
}
