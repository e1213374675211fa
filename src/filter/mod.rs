use crate::enrich::EnrichedTicket;

/// Operator-chosen filter state for the dashboard view. An empty
/// selection list means "no filter on that column".
#[derive(Debug, Clone, Default)]
pub struct Selections {
    pub status: Vec<String>,
    pub priority: Vec<String>,
    pub category: Vec<String>,
    pub assignee: Vec<String>,
    pub search: Option<String>,
}

impl Selections {
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
            && self.priority.is_empty()
            && self.category.is_empty()
            && self.assignee.is_empty()
            && self.search.as_deref().map_or(true, str::is_empty)
    }
}

/// Apply the selections to the enriched table. Pure: returns a new
/// table, never mutates or reorders the input. All active filters
/// combine with AND; the search term narrows the already-filtered set.
pub fn apply(tickets: &[EnrichedTicket], selections: &Selections) -> Vec<EnrichedTicket> {
    let term = selections
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    tickets
        .iter()
        .filter(|t| passes(&selections.status, &t.status))
        .filter(|t| passes(&selections.priority, &t.priority))
        .filter(|t| passes(&selections.category, &t.category))
        .filter(|t| {
            // A ticket with no assignee name only survives an active
            // assignee filter if nothing is selected.
            selections.assignee.is_empty()
                || t.assigned_name
                    .as_deref()
                    .is_some_and(|name| selections.assignee.iter().any(|a| a == name))
        })
        .filter(|t| match &term {
            None => true,
            Some(term) => {
                t.summary.to_lowercase().contains(term)
                    || t.description.to_lowercase().contains(term)
            }
        })
        .cloned()
        .collect()
}

fn passes(selected: &[String], value: &str) -> bool {
    selected.is_empty() || selected.iter().any(|s| s == value)
}
