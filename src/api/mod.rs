// Atomic API modules
pub mod account;
pub mod client;
pub mod error;
pub mod images;
pub mod linodes;
pub mod object_storage;
pub mod placement_groups;
pub mod regions;
pub mod stackscripts;

// Re-export commonly used functions
pub use account::{load_agreements, load_profile, sign_agreement};
pub use client::{api_call, get_all_pages};
pub use error::ApiCallError;
pub use images::load_images;
pub use linodes::{clone_linode, create_linode, load_linodes, load_types};
pub use object_storage::{load_objects, ObjectListPage};
pub use placement_groups::get_placement_group;
pub use regions::load_regions;
pub use stackscripts::get_stackscript;
