use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Failures while turning an export file into an in-memory record set.
/// Everything here leaves the tool in its "waiting for a file" state:
/// the message is printed and nothing is partially loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("export is missing the top-level \"{0}\" key")]
    MissingKey(&'static str),

    #[error("ticket #{index}: unrecognized created_at value {value:?}")]
    Timestamp { index: usize, value: String },
}

/// Raw export document. Every field is optional at the serde layer;
/// shape requirements are enforced afterwards so the error names the
/// missing key instead of pointing at a byte offset.
#[derive(Debug, Deserialize)]
struct RawExport {
    tickets: Option<Vec<RawTicket>>,
    users: Option<Vec<RawUser>>,
}

#[derive(Debug, Deserialize)]
struct RawTicket {
    summary: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    // Exports are inconsistent about id types (string vs integer),
    // so keep the join key loose and normalize later.
    assigned_to: Option<Value>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    import_id: Option<Value>,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Option<String>,
}

/// A ticket row as loaded, before enrichment.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub summary: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub category: String,
    pub assigned_to: Option<String>,
    pub created_at: Option<String>,
}

/// A user row as loaded.
#[derive(Debug, Clone)]
pub struct User {
    pub import_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
}

/// Both record sets from one export document.
#[derive(Debug, Clone)]
pub struct Export {
    pub tickets: Vec<Ticket>,
    pub users: Vec<User>,
}

/// Load an export from a file path.
pub fn load_file(path: &Path) -> Result<Export, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_export(&content, &path.display().to_string())
}

/// Load an export from stdin (for `tickdash dashboard -`).
pub fn load_stdin() -> Result<Export, LoadError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|source| LoadError::Read {
            path: "stdin".to_string(),
            source,
        })?;
    parse_export(&content, "stdin")
}

/// Parse an export document and normalize it into record sets.
pub fn parse_export(content: &str, origin: &str) -> Result<Export, LoadError> {
    let raw: RawExport = serde_json::from_str(content).map_err(|source| LoadError::Json {
        origin: origin.to_string(),
        source,
    })?;

    let tickets = raw.tickets.ok_or(LoadError::MissingKey("tickets"))?;
    let users = raw.users.ok_or(LoadError::MissingKey("users"))?;

    let tickets: Vec<Ticket> = tickets
        .into_iter()
        .map(|t| Ticket {
            summary: t.summary.unwrap_or_default(),
            description: t.description.unwrap_or_default(),
            status: t.status.unwrap_or_default(),
            priority: t.priority.unwrap_or_default(),
            category: t.category.unwrap_or_default(),
            assigned_to: t.assigned_to.as_ref().and_then(scalar_to_string),
            created_at: t.created_at,
        })
        .collect();

    let users: Vec<User> = users
        .into_iter()
        .map(|u| User {
            import_id: u.import_id.as_ref().and_then(scalar_to_string),
            first_name: u.first_name,
            last_name: u.last_name,
            role: u.role.unwrap_or_default(),
        })
        .collect();

    info!(
        "Loaded {} tickets and {} users from {}",
        tickets.len(),
        users.len(),
        origin
    );

    Ok(Export { tickets, users })
}

/// Normalize a JSON scalar to its string form. Integer and string ids
/// have to join against each other, so both become strings.
pub fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
