//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into fleet-level operations.
//! - Keep the CLI decoupled from storage keys and JSON details.

pub mod auth_service;
pub mod component_service;
pub mod fleet_service;
pub mod job_service;
pub mod notification_service;
pub mod seed;
