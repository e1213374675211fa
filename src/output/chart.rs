use crate::aggregate::{DailyCount, FrequencyRow, MonthlyCount};
use crate::output::table::truncate;

/// Render one proportional bar. Non-zero counts always get at least
/// one cell so small values stay visible next to large ones.
pub fn render_bar(count: usize, max: usize, width: usize) -> String {
    if count == 0 || max == 0 || width == 0 {
        return String::new();
    }
    let filled = ((count * width) / max).max(1);
    "█".repeat(filled)
}

/// Bar chart for a frequency table.
pub fn print_frequency_bars(rows: &[FrequencyRow], width: usize) {
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0);
    for r in rows {
        println!(
            "  {:<20} {:<width$} {}",
            truncate(&r.value, 20),
            render_bar(r.count, max, width),
            r.count,
            width = width
        );
    }
    println!();
}

/// Bar-per-day chart for the daily trend.
pub fn print_daily_bars(points: &[DailyCount], width: usize) {
    if points.is_empty() {
        println!("  (no tickets in range)\n");
        return;
    }
    let max = points.iter().map(|p| p.count).max().unwrap_or(0);
    for p in points {
        println!(
            "  {} {:<width$} {}",
            p.date,
            render_bar(p.count, max, width),
            p.count,
            width = width
        );
    }
    println!();
}

/// Bar-per-month chart for the monthly trend.
pub fn print_monthly_bars(rows: &[MonthlyCount], width: usize) {
    if rows.is_empty() {
        println!("  (no data)\n");
        return;
    }
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0);
    for r in rows {
        println!(
            "  {:<7} {:<width$} {}",
            r.month,
            render_bar(r.count, max, width),
            r.count,
            width = width
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_width() {
        assert_eq!(render_bar(10, 10, 20).chars().count(), 20);
        assert_eq!(render_bar(5, 10, 20).chars().count(), 10);
    }

    #[test]
    fn test_zero_count_renders_empty() {
        assert_eq!(render_bar(0, 10, 20), "");
    }

    #[test]
    fn test_small_nonzero_count_still_visible() {
        assert_eq!(render_bar(1, 1000, 20).chars().count(), 1);
    }
}
