//! The instance-creation wizard.
//!
//! [`CreateForm`] owns a [`CreationDraft`] together with read-only catalog
//! snapshots ([`CreateContext`]) and is the only thing that mutates the draft.
//! Request bodies come out of [`assemble_payload`], which is pure.

pub mod analytics;
pub mod controller;
pub mod errors;
pub mod label;
pub mod models;
pub mod payload;
pub mod schema;
pub mod validation;

// Re-export commonly used items
pub use analytics::CreateEvent;
pub use controller::{CreateContext, CreateForm, SubmitGate, SubmitRequest, SubmitTicket};
pub use errors::{ErrorMap, SubmitError, CREATE_ERROR_FIELDS, DEFAULT_ERROR_MESSAGE};
pub use label::{derive_default_label, ensure_unique_label, MAX_LABEL_LENGTH};
pub use models::*;
pub use payload::assemble_payload;
pub use schema::validate_create_request;
pub use validation::{
    is_valid_vpc_ipv4, placement_group_capacity_error, CharacterClassPolicy, PasswordValidator,
};
