use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::enrich::EnrichedTicket;

/// Categorical columns the dashboard aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Status,
    Priority,
    Category,
    Assignee,
}

impl Column {
    pub fn label(&self) -> &'static str {
        match self {
            Column::Status => "Status",
            Column::Priority => "Priority",
            Column::Category => "Category",
            Column::Assignee => "Assignee",
        }
    }

    /// Missing assignee names are excluded from the assignee
    /// distribution (unnamed rows still count everywhere else).
    fn value<'a>(&self, t: &'a EnrichedTicket) -> Option<&'a str> {
        match self {
            Column::Status => Some(&t.status),
            Column::Priority => Some(&t.priority),
            Column::Category => Some(&t.category),
            Column::Assignee => t.assigned_name.as_deref(),
        }
    }
}

/// One row of a frequency table: distinct value, occurrence count, and
/// share of the counted total.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrequencyRow {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Count occurrences per distinct value of `column`, descending by
/// count with ascending value as tiebreak. Percentages are of the
/// counted total (rows with a missing value are not counted).
pub fn frequency(tickets: &[EnrichedTicket], column: Column) -> Vec<FrequencyRow> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for t in tickets {
        if let Some(value) = column.value(t) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let total: usize = counts.values().sum();
    let mut rows: Vec<FrequencyRow> = counts
        .into_iter()
        .map(|(value, count)| FrequencyRow {
            value: value.to_string(),
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect();

    // BTreeMap iteration already gives ascending value, so a stable
    // sort on count keeps that order within equal counts.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Min and max creation date across the table. None when empty.
pub fn date_bounds(tickets: &[EnrichedTicket]) -> Option<(NaiveDate, NaiveDate)> {
    let min = tickets.iter().map(|t| t.created_at_date).min()?;
    let max = tickets.iter().map(|t| t.created_at_date).max()?;
    Some((min, max))
}

/// One point of the daily creation trend.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Tickets created per day within `[start, end]` inclusive, in date
/// order. Days with no tickets produce no point.
pub fn daily_trend(tickets: &[EnrichedTicket], start: NaiveDate, end: NaiveDate) -> Vec<DailyCount> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for t in tickets {
        if t.created_at_date >= start && t.created_at_date <= end {
            *counts.entry(t.created_at_date).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// One row of the monthly creation trend, keyed `YYYY-MM`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}

/// Tickets created per calendar month, in calendar order. Zero-padded
/// `YYYY-MM` keys make lexical order chronological.
pub fn monthly_trend(tickets: &[EnrichedTicket]) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for t in tickets {
        let key = format!(
            "{:04}-{:02}",
            t.created_at_date.year(),
            t.created_at_date.month()
        );
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

/// Sum of the monthly rows, for the presentation-only "Total" line.
pub fn monthly_total(rows: &[MonthlyCount]) -> usize {
    rows.iter().map(|r| r.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich;
    use crate::load::parse_export;

    fn tickets(json: &str) -> Vec<EnrichedTicket> {
        enrich(&parse_export(json, "test").unwrap()).unwrap()
    }

    #[test]
    fn test_frequency_known_split() {
        // open=2 (66.7%), closed=1 (33.3%)
        let rows = frequency(
            &tickets(
                r#"{"tickets": [
                    {"status": "open", "created_at": "2026-01-01"},
                    {"status": "open", "created_at": "2026-01-02"},
                    {"status": "closed", "created_at": "2026-01-03"}
                ], "users": []}"#,
            ),
            Column::Status,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value, "open");
        assert_eq!(rows[0].count, 2);
        assert!((rows[0].percentage - 66.666).abs() < 0.01);
        assert_eq!(rows[1].value, "closed");
        assert_eq!(rows[1].count, 1);
        assert!((rows[1].percentage - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_frequency_counts_sum_to_row_count_and_percentages_to_100() {
        let t = tickets(
            r#"{"tickets": [
                {"category": "hw", "created_at": "2026-01-01"},
                {"category": "sw", "created_at": "2026-01-02"},
                {"category": "hw", "created_at": "2026-01-03"},
                {"category": "net", "created_at": "2026-01-04"},
                {"category": "hw", "created_at": "2026-01-05"},
                {"category": "sw", "created_at": "2026-01-06"},
                {"category": "net", "created_at": "2026-01-07"}
            ], "users": []}"#,
        );
        let rows = frequency(&t, Column::Category);
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), t.len());
        let pct: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_orders_by_count_then_value() {
        let rows = frequency(
            &tickets(
                r#"{"tickets": [
                    {"priority": "low", "created_at": "2026-01-01"},
                    {"priority": "high", "created_at": "2026-01-02"},
                    {"priority": "medium", "created_at": "2026-01-03"},
                    {"priority": "medium", "created_at": "2026-01-04"}
                ], "users": []}"#,
            ),
            Column::Priority,
        );
        let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["medium", "high", "low"]);
    }

    #[test]
    fn test_assignee_frequency_skips_unnamed() {
        let t = tickets(
            r#"{
                "tickets": [
                    {"assigned_to": "u1", "created_at": "2026-01-01"},
                    {"assigned_to": "u1", "created_at": "2026-01-02"},
                    {"created_at": "2026-01-03"}
                ],
                "users": [{"import_id": "u1", "first_name": "Ada", "last_name": "Byron", "role": "admin"}]
            }"#,
        );
        let rows = frequency(&t, Column::Assignee);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 2);
        assert!((rows[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_of_empty_table() {
        assert!(frequency(&[], Column::Status).is_empty());
    }

    #[test]
    fn test_date_bounds() {
        let t = tickets(
            r#"{"tickets": [
                {"created_at": "2026-02-10"},
                {"created_at": "2025-12-31"},
                {"created_at": "2026-01-15"}
            ], "users": []}"#,
        );
        let (min, max) = date_bounds(&t).unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        assert!(date_bounds(&[]).is_none());
    }

    #[test]
    fn test_daily_trend_single_day_range() {
        let t = tickets(
            r#"{"tickets": [
                {"created_at": "2026-01-05T09:00:00Z"},
                {"created_at": "2026-01-05T17:00:00Z"},
                {"created_at": "2026-01-06"}
            ], "users": []}"#,
        );
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let points = daily_trend(&t, day, day);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, day);
        assert_eq!(points[0].count, 2);
    }

    #[test]
    fn test_daily_trend_range_is_inclusive_and_ordered() {
        let t = tickets(
            r#"{"tickets": [
                {"created_at": "2026-01-07"},
                {"created_at": "2026-01-05"},
                {"created_at": "2026-01-06"},
                {"created_at": "2026-01-09"}
            ], "users": []}"#,
        );
        let points = daily_trend(
            &t,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 7).unwrap(),
        );
        assert_eq!(points.len(), 3);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_monthly_trend_calendar_order_across_years() {
        let rows = monthly_trend(&tickets(
            r#"{"tickets": [
                {"created_at": "2026-02-01"},
                {"created_at": "2025-11-20"},
                {"created_at": "2026-01-10"},
                {"created_at": "2026-01-25"}
            ], "users": []}"#,
        ));
        let months: Vec<&str> = rows.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, vec!["2025-11", "2026-01", "2026-02"]);
        assert_eq!(rows[1].count, 2);
    }

    #[test]
    fn test_monthly_total_matches_row_sum() {
        let t = tickets(
            r#"{"tickets": [
                {"created_at": "2026-01-01"},
                {"created_at": "2026-01-02"},
                {"created_at": "2026-02-03"}
            ], "users": []}"#,
        );
        let rows = monthly_trend(&t);
        assert_eq!(monthly_total(&rows), t.len());
    }
}
