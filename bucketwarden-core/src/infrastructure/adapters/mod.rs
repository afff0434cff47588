// bucketwarden-core/src/infrastructure/adapters/mod.rs

pub mod memory;
pub mod rest;
