//! SmartShopr - sync coordinator for the SmartShopr shopping list service
//!
//! This library keeps a local, periodically refreshed view of a SmartShopr
//! account (shopping lists with their items, budgets and the month's
//! expenses) and forwards item changes back to the service.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`transport`] - Authenticated HTTP calls and status mapping
//! * [`api`] - Typed service operations
//! * [`coordinator`] - Refresh cycle and snapshot ownership
//! * [`display`] - Item text rendering and parsing
//! * [`entities`] - Todo list and sensor consumers of the snapshot
//! * [`setup`] - Account setup and teardown
//! * [`config`] - Application configuration management

/// Typed operations on the SmartShopr API
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Snapshot refresh coordinator
pub mod coordinator;

/// Rendering and parsing of item display names
pub mod display;

/// Todo list and sensor entities built on the snapshot
pub mod entities;

/// Error types
pub mod error;

/// Logging setup
pub mod logger;

/// Data model and response envelopes
pub mod models;

/// Account setup flow
pub mod setup;

/// HTTP transport
pub mod transport;

pub use api::{CredentialStatus, SmartShoprApi};
pub use coordinator::{SyncCoordinator, SyncStatus};
pub use error::{ApiError, SetupError, SyncError};
pub use models::{Budget, ExpenseSummary, ItemUpdate, ListItem, NewItem, ShoppingList, Snapshot};
