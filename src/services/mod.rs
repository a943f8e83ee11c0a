pub mod create_service;
pub mod object_storage_service;
pub mod wizard_service;

// Re-export commonly used functions
pub use create_service::{
    after_create, dispatch, load_create_context, submit, CreateBackend, LinodeApiBackend,
    SubmitOutcome,
};
pub use object_storage_service::{extend_object, extend_objects, table_content, ObjectRow, ObjectTableContent};
pub use wizard_service::{parse_create_link, parse_create_query, seed_draft, seed_form, CreateQuery, CreateTab, DEFAULT_IMAGE};
