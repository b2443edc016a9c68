//! Show, achievements and calendar commands

use anyhow::Result;

use edustem::progress::{achievement_board, activity_calendar};
use edustem::ProgressManager;

pub fn show_command(manager: &ProgressManager, json: bool) -> Result<()> {
    if json {
        println!("{}", manager.export_progress()?);
        return Ok(());
    }

    let summary = manager.summary();
    let level = summary.level;

    println!(
        "Level {} - {} XP ({:.0}% of the way, {} XP to level {})",
        level.level,
        level.total_xp,
        level.progress_to_next() * 100.0,
        level.xp_to_next(),
        level.level + 1
    );
    println!(
        "Videos: {}  Games: {}  Time: {} min  Streak: {} day(s)",
        summary.videos_watched, summary.games_played, summary.time_spent, summary.current_streak
    );
    println!();

    for (subject, progress) in &summary.subjects {
        println!(
            "  {:<12} {:>3}%  {} XP",
            subject.label(),
            progress.progress,
            progress.xp
        );
    }
    println!("  {:<12} {:>3}% Complete", "Overall", summary.overall_percent());
    println!();

    if summary.recent_achievements.is_empty() {
        println!("No achievements yet.");
    } else {
        println!("Recent achievements ({} total):", summary.unlocked_count);
        for achievement in summary.recent_achievements.iter().rev() {
            println!("  {} {}", achievement.icon, achievement.name);
        }
    }

    Ok(())
}

pub fn achievements_command(manager: &ProgressManager, json: bool) -> Result<()> {
    let board = achievement_board(&manager.get_progress());

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    for status in board {
        let a = status.achievement;
        let state = if status.unlocked {
            "Earned".to_string()
        } else {
            format!("{}/{}", status.current, status.target)
        };
        println!(
            "{} {:<18} {:<8} +{:<4} {}",
            a.icon, a.name, state, a.xp_reward, a.description
        );
    }

    Ok(())
}

pub fn calendar_command(manager: &ProgressManager, days: u32) -> Result<()> {
    let calendar = activity_calendar(&manager.get_progress(), manager.today(), days);
    for (date, active) in calendar {
        println!("{}  {}", date.format("%a %Y-%m-%d"), if active { "■" } else { "·" });
    }
    Ok(())
}
