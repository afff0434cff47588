// bucketwarden-core/src/ports/mod.rs

pub mod remediation;

pub use remediation::{AclMutator, Notifier, PolicyContext, PolicyLookup};
