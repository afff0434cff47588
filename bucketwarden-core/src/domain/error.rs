// bucketwarden-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Event field '{0}' is missing or not a string")]
    #[diagnostic(
        code(warden::domain::missing_field),
        help("Compliance events must carry 'detail.resourceId' and 'detail.newEvaluationResult.annotation'.")
    )]
    MissingEventField(&'static str),

    #[error("Event payload is not a JSON object")]
    #[diagnostic(code(warden::domain::malformed_event))]
    MalformedEvent,
}
