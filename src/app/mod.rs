//! Application layer wiring commands to domain services.

pub mod commands;
