//! CLI command implementations

pub mod init;
pub mod record;
pub mod show;
pub mod transfer;

use edustem::ProgressEvent;

/// Print the events an operation produced, one per line
pub fn print_events(events: &[ProgressEvent]) {
    for event in events {
        match event {
            ProgressEvent::PersistFailed { .. } => eprintln!("Warning: {}", event.describe()),
            _ => println!("{}", event.describe()),
        }
    }
}
