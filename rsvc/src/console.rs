// rsvc/src/console.rs
use colored::Colorize;
use rsvc_common::events::{InstallEvent, LoggingSink};
use rsvc_common::status::{Status, StatusLevel};

/// Prints install progress to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LoggingSink for ConsoleSink {
    fn info(&self, message: &str) {
        println!("    {message}");
    }

    fn event(&self, event: &InstallEvent) {
        println!("{}{}", "==> ".bold().blue(), event.to_string().bold());
    }
}

pub fn print_statuses(statuses: &[Status]) {
    for status in statuses {
        let label = match status.level {
            StatusLevel::Error => "error".red().bold(),
            StatusLevel::Warn => "warning".yellow().bold(),
            StatusLevel::Info => "info".normal(),
        };
        eprintln!("{}: {} {}", label, status.key.as_str().dimmed(), status.detail);
    }
}
