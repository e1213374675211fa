use unicode_width::UnicodeWidthStr;

use crate::aggregate::{monthly_total, FrequencyRow, MonthlyCount};
use crate::enrich::EnrichedTicket;

/// Truncate a string to fit within max_width (respecting unicode width).
pub fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + cw + 3 > max_width {
            result.push_str("...");
            break;
        }
        result.push(ch);
        width += cw;
    }
    result
}

/// Format the filtered ticket table.
pub fn print_ticket_list(tickets: &[EnrichedTicket], missing_label: &str, limit: usize) {
    if tickets.is_empty() {
        println!("No tickets match the current filters.");
        return;
    }

    println!(
        "{} ticket{}:\n",
        tickets.len(),
        if tickets.len() == 1 { "" } else { "s" }
    );

    println!(
        "  {:<34} {:<10} {:<10} {:<14} {:<20} {:<12}",
        "SUMMARY", "STATUS", "PRIORITY", "CATEGORY", "ASSIGNEE", "CREATED"
    );
    println!("  {}", "-".repeat(104));

    for t in tickets.iter().take(limit) {
        let assignee = t.assigned_name.as_deref().unwrap_or(missing_label);
        println!(
            "  {:<34} {:<10} {:<10} {:<14} {:<20} {:<12}",
            truncate(&t.summary, 32),
            truncate(&t.status, 10),
            truncate(&t.priority, 10),
            truncate(&t.category, 14),
            truncate(assignee, 20),
            t.created_at_date.to_string(),
        );
    }

    if tickets.len() > limit {
        println!(
            "  ... and {} more (raise --limit to see them)",
            tickets.len() - limit
        );
    }
    println!();
}

/// Format a frequency table with count and percentage columns.
pub fn print_frequency_table(label: &str, rows: &[FrequencyRow]) {
    if rows.is_empty() {
        println!("  (no data)\n");
        return;
    }

    println!(
        "  {:<26} {:>7} {:>9}",
        label.to_uppercase(),
        "COUNT",
        "PERCENT"
    );
    println!("  {}", "-".repeat(44));
    for r in rows {
        println!(
            "  {:<26} {:>7} {:>8.1}%",
            truncate(&r.value, 26),
            r.count,
            r.percentage
        );
    }
    println!();
}

/// Format the monthly table with its trailing Total row. The Total is
/// presentation-only; it never feeds back into any aggregate.
pub fn print_monthly_table(rows: &[MonthlyCount]) {
    if rows.is_empty() {
        println!("  (no data)\n");
        return;
    }

    println!("  {:<10} {:>7}", "MONTH", "COUNT");
    println!("  {}", "-".repeat(18));
    for r in rows {
        println!("  {:<10} {:>7}", r.month, r.count);
    }
    println!("  {}", "-".repeat(18));
    println!("  {:<10} {:>7}", "Total", monthly_total(rows));
    println!();
}
