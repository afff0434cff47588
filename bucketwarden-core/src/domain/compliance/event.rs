// bucketwarden-core/src/domain/compliance/event.rs

use serde_json::Value;

use crate::domain::error::DomainError;

/// One compliance-violation notification, as delivered by the rule
/// evaluator through the event bus.
///
/// The event schema is externally produced; we only assert field presence.
/// A missing field is NOT a fatal condition for the engine: it treats the
/// event as an already-remediated duplicate (see the application layer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationEvent {
    pub resource_id: String,
    pub annotation: String,
}

impl ViolationEvent {
    /// Extracts the bucket name and the compliance annotation from a raw
    /// event payload.
    ///
    /// Expected paths (owned by the rule evaluator, not by us):
    /// - `detail.resourceId`
    /// - `detail.newEvaluationResult.annotation`
    pub fn from_json(event: &Value) -> Result<Self, DomainError> {
        if !event.is_object() {
            return Err(DomainError::MalformedEvent);
        }

        let resource_id = event
            .pointer("/detail/resourceId")
            .and_then(Value::as_str)
            .ok_or(DomainError::MissingEventField("detail.resourceId"))?;

        let annotation = event
            .pointer("/detail/newEvaluationResult/annotation")
            .and_then(Value::as_str)
            .ok_or(DomainError::MissingEventField(
                "detail.newEvaluationResult.annotation",
            ))?;

        Ok(Self {
            resource_id: resource_id.to_string(),
            annotation: annotation.to_string(),
        })
    }
}
