// bucketwarden-core/src/lib.rs

#![allow(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for the three external collaborators (PolicyLookup, AclMutator, Notifier)
pub mod ports;

// 2. Domain (Core remediation logic)
// Warning categories, event extraction, decision table.
// Depends on NOTHING else (no infra, no app).
pub mod domain;

// 3. Infrastructure (Adapters)
// REST thin clients, in-memory fakes, config loading.
// Depends on the Domain and the Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// The Remediation Decision Engine (handle).
// Depends on the Domain, the Infra and the Ports.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// Lets callers import the main error easily: use bucketwarden_core::WardenError;
pub use error::WardenError;
