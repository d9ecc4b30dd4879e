mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{BlobError, Result, StoreError};
pub use http_mapping::store_error_to_status_code;
pub use traits::ObjectStore;
pub use types::{page_bounds, total_pages, Page};
