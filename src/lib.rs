//! Professional Desk - client core for the professionals contact registry
//!
//! This crate provides the client side of a small CRUD system: a record form
//! that validates and submits new professionals, a list view that browses
//! them filtered by source, and a bulk import client.
//!
//! ## Submission pipeline
//! Draft -> local validation gate -> create request -> reset on success,
//! or failure classification -> field-keyed error map.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use professional_desk::{ClientConfig, FieldUpdate, FormController, HttpProfessionalApi};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let api = HttpProfessionalApi::new(ClientConfig::from_env()?)?;
//! let mut form = FormController::new(api);
//! form.set_field(FieldUpdate::FullName("John Doe".into()));
//! form.set_field(FieldUpdate::Email("john.doe@example.com".into()));
//! let outcome = form.submit().await;
//! assert!(outcome.is_created() || !form.errors().is_empty());
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Record, draft and error map types
pub mod types;

// Environment-driven client configuration
pub mod config;

// REST transport boundary
pub mod api;

// Failure classification for the create request
pub mod classify;

// Record form controller
pub mod form;

// Record list view
pub mod list;

// Bulk upsert client
pub mod bulk;

// Terminal rendering of errors and tables
pub mod render;

pub use api::{CreateAck, CreateFailure, HttpProfessionalApi, ProfessionalApi, ResponseBody};
pub use bulk::{load_profiles, BulkOutcome, BulkUpsertReport, ProfilePatch};
pub use classify::{classify, FailureKind, Rejection};
pub use config::ClientConfig;
pub use error::{ApiError, BulkFileError, ConfigError, ParseError};
pub use form::{validate_draft, FormController, FormEvent, SubmitOutcome};
pub use list::{ApplyOutcome, ListTicket, ListView};
pub use types::{
    ErrorMap, ErrorMessages, Field, FieldUpdate, Professional, ProfessionalDraft, ProfessionalRow,
    Source, SourceFilter, NON_FIELD_ERRORS,
};
