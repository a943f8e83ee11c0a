// Query string handling
pub mod query_string;

// Parsing utilities
pub mod parse_flag;
pub mod parse_int;

// Display utilities
pub mod readable_bytes;
pub mod truncate;

// Re-export all utilities for convenient access
pub use query_string::parse_query_string;
pub use parse_flag::parse_flag;
pub use parse_int::parse_optional_id;
pub use readable_bytes::readable_bytes;
pub use truncate::{truncate_end, truncate_middle};
