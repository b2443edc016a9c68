//! Record, bonus and content commands

use anyhow::Result;

use edustem::{ActivityDetails, ActivityKind, ProgressManager};

use super::print_events;

/// Map short CLI names onto activity types; anything else is passed through
fn parse_activity(name: &str) -> ActivityKind {
    match name {
        "video" => ActivityKind::VideoWatched,
        "game" => ActivityKind::GamePlayed,
        "time" => ActivityKind::TimeSpent,
        other => ActivityKind::from(other),
    }
}

pub fn record_command(
    manager: &ProgressManager,
    activity: &str,
    subject: Option<String>,
    xp: Option<u32>,
    minutes: Option<u32>,
) -> Result<()> {
    let kind = parse_activity(activity);
    if let ActivityKind::Other(name) = &kind {
        eprintln!("Unknown activity type '{}': only the streak will be updated", name);
    }

    let details = ActivityDetails {
        subject,
        xp,
        minutes,
    };
    print_events(&manager.record_activity(kind, details));
    Ok(())
}

pub fn bonus_command(manager: &ProgressManager, amount: u32) -> Result<()> {
    print_events(&manager.add_xp(amount));
    Ok(())
}

pub fn content_command(manager: &ProgressManager, id: &str) -> Result<()> {
    let events = manager.complete_content(id);
    println!("Completed: {}", id);
    print_events(&events);
    Ok(())
}
