pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::{collection_get, collection_post};
pub use record::{record_delete, record_get, record_patch, record_put};
