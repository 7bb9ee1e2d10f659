use std::collections::HashSet;

use serde::Serialize;
use utoipa::ToSchema;

/// A single rule violation found while validating an order aggregate.
/// Violations are data handed back to the caller, never panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Violation {
    /// Payload field the violation is reported against.
    pub field: &'static str,
    pub message: &'static str,
}

impl Violation {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Snapshot of the reference data an order may point at. Fetched per request
/// by the caller; the validator itself performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIds {
    pub clients: HashSet<i32>,
    pub items: HashSet<i32>,
}

impl ReferenceIds {
    pub fn new(
        clients: impl IntoIterator<Item = i32>,
        items: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            clients: clients.into_iter().collect(),
            items: items.into_iter().collect(),
        }
    }
}

/// The fields of a submitted order that participate in aggregate validation.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub client_id: Option<i32>,
    pub invoice_no: String,
    pub lines: Vec<LineDraft>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineDraft {
    pub item_id: Option<i32>,
}

/// Checks the order aggregate rules, accumulating every violation found so
/// the caller can report them all at once. An empty result means valid.
pub fn validate_order(draft: &OrderDraft, refs: &ReferenceIds) -> Vec<Violation> {
    let mut violations = Vec::new();

    let client_known = draft
        .client_id
        .is_some_and(|id| refs.clients.contains(&id));
    if !client_known {
        violations.push(Violation::new("clientId", "customer required"));
    }

    if draft.invoice_no.trim().is_empty() {
        violations.push(Violation::new("invoiceNo", "invoice number required"));
    }

    if draft.lines.is_empty() {
        violations.push(Violation::new("lines", "at least one line item required"));
    } else {
        let item_missing = draft
            .lines
            .iter()
            .any(|line| !line.item_id.is_some_and(|id| refs.items.contains(&id)));
        if item_missing {
            violations.push(Violation::new("lines", "item required on all lines"));
        }
    }

    violations
}
