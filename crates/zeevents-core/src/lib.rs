//! Ze Events Core - Form Validation and Submission Pipeline
//!
//! This crate provides the form pipeline for the Ze Events wedding
//! planning site: declarative field schemas, a pure validator, a form
//! session state machine, and submission adapters over swappable
//! backend collaborators.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Ze Events Core                        │
//! ├─────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐        ┌──────────────┐               │
//! │  │ Form Schemas │───────▶│  Validator   │ (pure)        │
//! │  └──────────────┘        └──────┬───────┘               │
//! │                                 │                        │
//! │                      ┌──────────▼──────────┐            │
//! │                      │    Form Session     │            │
//! │                      │ (touched / gating)  │            │
//! │                      └──────────┬──────────┘            │
//! │                                 │ ValidatedForm          │
//! │                      ┌──────────▼──────────┐            │
//! │                      │ Submission Adapters │            │
//! │                      └──────────┬──────────┘            │
//! │            ┌────────────────────┼───────────────────┐   │
//! │       ┌────▼────┐         ┌────▼─────┐       ┌─────▼─┐ │
//! │       │  Auth   │         │ Records  │       │Storage│ │
//! │       └─────────┘         └──────────┘       └───────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Features
//!
//! - **Declarative schemas**: typed fields with ordered rules
//! - **Pure validation**: deterministic, first failing rule per field
//! - **Session gating**: touched-field error visibility, double-submit guard
//! - **Swappable backends**: in-memory demo or hosted remote, same traits

pub mod adapters;
pub mod backend;
pub mod config;
pub mod error;
pub mod forms;
pub mod schema;
pub mod session;
pub mod validate;

pub use adapters::{SubmissionAdapter, SubmissionOutcome, SubmitContext};
pub use backend::{AuthService, AuthSession, AuthUser, Backend, ObjectStorage, RecordStore};
pub use config::{AdminCredentials, AppConfig, BackendMode};
pub use error::{BackendError, CoreError, Result};
pub use forms::FormKind;
pub use schema::{FieldKind, FieldSpec, FormSchema, Rule, RuleKind};
pub use session::{FormSession, SubmitGate, ValidatedForm};
pub use validate::{validate, FieldValues, ValidationResult};

/// Core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
