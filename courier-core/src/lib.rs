//! # courier-core
//!
//! Domain model for the courier notification backend.
//!
//! This crate provides the resource structs (notifications, audiences,
//! targets, templates), the domain error taxonomy, and the in-memory
//! resource stores the HTTP layer reads and writes.

pub mod error;
pub mod models;
pub mod store;

pub use error::DomainError;
pub use models::{
    Audience, Notification, NotificationStatus, Page, ResourceKind, Target, Template,
};
pub use store::{ResourceStore, StoreHandle};
