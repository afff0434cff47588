// bucketwarden-core/src/application/mod.rs

pub mod remediation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do `use bucketwarden_core::application::{RemediationEngine, RemediationOutcome};`
// without knowing the internal file structure.
pub use remediation::{RemediationEngine, RemediationOutcome};
