use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use crate::load::{Export, LoadError};

/// A ticket row after the admin-name join and date derivation.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedTicket {
    pub summary: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub category: String,
    pub assigned_to: Option<String>,
    /// "first last" of the matching admin user. None when no admin
    /// matches, when the ticket is unassigned, or when either name part
    /// is missing on the matched user.
    pub assigned_name: Option<String>,
    pub created_at: String,
    pub created_at_date: NaiveDate,
}

/// Join admin-user names onto tickets and derive the creation date.
///
/// Ticket-preserving: every ticket row comes out exactly once, matched
/// or not. Only users with `role == "admin"` participate in the lookup;
/// tickets assigned to anyone else get no name. Duplicate admin
/// `import_id`s resolve last-match-wins (file order).
pub fn enrich(export: &Export) -> Result<Vec<EnrichedTicket>, LoadError> {
    let mut admins: HashMap<&str, (Option<&str>, Option<&str>)> = HashMap::new();
    for user in &export.users {
        if user.role != "admin" {
            continue;
        }
        if let Some(id) = user.import_id.as_deref() {
            admins.insert(id, (user.first_name.as_deref(), user.last_name.as_deref()));
        }
    }

    let mut rows = Vec::with_capacity(export.tickets.len());
    for (index, ticket) in export.tickets.iter().enumerate() {
        let assigned_name = ticket
            .assigned_to
            .as_deref()
            .and_then(|id| admins.get(id))
            .and_then(|(first, last)| match (first, last) {
                (Some(f), Some(l)) => Some(format!("{f} {l}")),
                _ => None,
            });

        let created_at = ticket.created_at.clone().ok_or_else(|| LoadError::Timestamp {
            index,
            value: "(missing)".to_string(),
        })?;
        let created_at_date = parse_date(&created_at).ok_or_else(|| LoadError::Timestamp {
            index,
            value: created_at.clone(),
        })?;

        rows.push(EnrichedTicket {
            summary: ticket.summary.clone(),
            description: ticket.description.clone(),
            status: ticket.status.clone(),
            priority: ticket.priority.clone(),
            category: ticket.category.clone(),
            assigned_to: ticket.assigned_to.clone(),
            assigned_name,
            created_at,
            created_at_date,
        });
    }

    let named = rows.iter().filter(|r| r.assigned_name.is_some()).count();
    info!(
        "Enriched {} tickets against {} admin users ({} with assignee names)",
        rows.len(),
        admins.len(),
        named
    );

    Ok(rows)
}

/// Parse a creation timestamp down to its calendar date. Accepts
/// RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, and bare
/// `YYYY-MM-DD` — exports disagree on which they write.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_export;

    fn export(json: &str) -> Export {
        parse_export(json, "test").unwrap()
    }

    #[test]
    fn test_left_join_preserves_unmatched_tickets() {
        let e = export(
            r#"{
                "tickets": [
                    {"summary": "a", "assigned_to": "u1", "created_at": "2026-01-05"},
                    {"summary": "b", "assigned_to": "nobody", "created_at": "2026-01-06"},
                    {"summary": "c", "created_at": "2026-01-07"}
                ],
                "users": [
                    {"import_id": "u1", "first_name": "Ada", "last_name": "Byron", "role": "admin"}
                ]
            }"#,
        );
        let rows = enrich(&e).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].assigned_name.as_deref(), Some("Ada Byron"));
        assert!(rows[1].assigned_name.is_none());
        assert!(rows[2].assigned_name.is_none());
    }

    #[test]
    fn test_non_admin_users_do_not_join() {
        let e = export(
            r#"{
                "tickets": [{"assigned_to": "u2", "created_at": "2026-01-05"}],
                "users": [
                    {"import_id": "u2", "first_name": "Eve", "last_name": "Lyn", "role": "agent"}
                ]
            }"#,
        );
        let rows = enrich(&e).unwrap();
        assert!(rows[0].assigned_name.is_none());
    }

    #[test]
    fn test_duplicate_admin_id_last_match_wins() {
        let e = export(
            r#"{
                "tickets": [{"assigned_to": "u1", "created_at": "2026-01-05"}],
                "users": [
                    {"import_id": "u1", "first_name": "First", "last_name": "Admin", "role": "admin"},
                    {"import_id": "u1", "first_name": "Second", "last_name": "Admin", "role": "admin"}
                ]
            }"#,
        );
        let rows = enrich(&e).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].assigned_name.as_deref(), Some("Second Admin"));
    }

    #[test]
    fn test_partial_name_yields_no_assigned_name() {
        let e = export(
            r#"{
                "tickets": [{"assigned_to": "u1", "created_at": "2026-01-05"}],
                "users": [{"import_id": "u1", "first_name": "Ada", "role": "admin"}]
            }"#,
        );
        let rows = enrich(&e).unwrap();
        assert!(rows[0].assigned_name.is_none());
    }

    #[test]
    fn test_numeric_id_joins_string_id() {
        let e = export(
            r#"{
                "tickets": [{"assigned_to": 42, "created_at": "2026-01-05"}],
                "users": [{"import_id": "42", "first_name": "Ada", "last_name": "Byron", "role": "admin"}]
            }"#,
        );
        let rows = enrich(&e).unwrap();
        assert_eq!(rows[0].assigned_name.as_deref(), Some("Ada Byron"));
    }

    #[test]
    fn test_bad_timestamp_is_a_load_error() {
        let e = export(r#"{"tickets": [{"created_at": "soon"}], "users": []}"#);
        let err = enrich(&e).unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_missing_timestamp_is_a_load_error() {
        let e = export(r#"{"tickets": [{"summary": "x"}], "users": []}"#);
        assert!(enrich(&e).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(parse_date("2026-03-09T14:30:00Z"), Some(expected));
        assert_eq!(parse_date("2026-03-09T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_date("2026-03-09 14:30:00"), Some(expected));
        assert_eq!(parse_date("2026-03-09T14:30:00"), Some(expected));
        assert_eq!(parse_date("2026-03-09"), Some(expected));
        assert_eq!(parse_date("03/09/2026"), None);
    }
}
