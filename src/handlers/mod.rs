pub mod helpers;
pub mod object_storage;
pub mod wizard;

pub use object_storage::bucket_objects_get;
pub use wizard::{create_get, create_patch, create_post, create_validate, FormView};
