//! Human-facing progress and summary lines

use crate::core::deduplicator::{DayStats, DedupReport};

const RULE_WIDTH: usize = 60;

pub fn print_banner() {
    println!("Presence History Cleanup (Rust Edition)");
    println!("Removes duplicate presences within each day");
    println!();
}

/// One line per day whose presence count changed
pub fn format_day_fix(stats: &DayStats) -> String {
    format!(
        "🧹 {}: {} → {} (removed {} duplicate{})",
        stats.date,
        stats.before,
        stats.after,
        stats.removed(),
        if stats.removed() == 1 { "" } else { "s" }
    )
}

pub fn print_summary(report: &DedupReport) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{}", rule);
    println!("CLEANUP SUMMARY");
    println!("{}", rule);
    println!("Total dates processed: {}", report.total_days);
    println!("Dates with duplicates: {}", report.fixed_days().count());
    println!("Total presences BEFORE: {}", report.total_before());
    println!("Total presences AFTER: {}", report.total_after());
    println!("Duplicates REMOVED: {}", report.removed());
    println!("{}", rule);
    println!();
}
