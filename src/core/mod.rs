pub mod error;
pub mod pagination;
pub mod response;
pub mod traits;

pub use error::{AppError, Result};
pub use pagination::{Page, PageParams};
pub use response::{ApiResponse, MessageResponse, ResponseStatus};
