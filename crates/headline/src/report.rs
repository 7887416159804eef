use crate::prelude::{println, *};
use colored::Colorize;
use headline_core::stats::RunStats;
use std::path::Path;
use std::time::Duration;

/// Print the end-of-run summary table.
pub fn print_summary(stats: &RunStats, elapsed: Duration, output: &Path) {
    println!("\n{}", "== Summary ==".bold().cyan());

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Samples".bold().cyan(),
        group_thousands(stats.records).bright_white().to_string()
    ]);
    table.add_row(prettytable::row![
        "QA pairs".bold().cyan(),
        group_thousands(stats.qa_pairs).bright_white().to_string()
    ]);
    if stats.skipped > 0 {
        table.add_row(prettytable::row![
            "Skipped".bold().cyan(),
            group_thousands(stats.skipped).yellow().to_string()
        ]);
    }
    table.add_row(prettytable::row![
        "Elapsed (s)".bold().cyan(),
        format!("{:.2}", elapsed.as_secs_f64()).bright_black().to_string()
    ]);
    table.add_row(prettytable::row![
        "Output".bold().cyan(),
        output.display().to_string().bright_green().to_string()
    ]);

    println!("{}", table);
}

/// Format `n` with `,` thousands separators.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
