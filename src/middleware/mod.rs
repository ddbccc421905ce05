pub mod error_handler;
pub mod request_id;

pub use error_handler::{configure_extractors, not_found};
pub use request_id::{RequestId, RequestIdValue, REQUEST_ID_HEADER};
