use anyhow::Result;
use serde::Serialize;

/// Pretty-print a serializable value as JSON to stdout. All `--json`
/// output funnels through here so machine consumers see one shape.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
