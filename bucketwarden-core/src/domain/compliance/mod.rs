// bucketwarden-core/src/domain/compliance/mod.rs

pub mod decision;
pub mod event;
pub mod warning;

pub use decision::{subject_for, NoticeKind, RemediationPlan};
pub use event::ViolationEvent;
pub use warning::WarningCategory;
