//! Stockroom inventory service library
//!
//! Layered CRUD backend: actix-web controllers call services, services run
//! repository operations inside a unit of work, repositories talk to MySQL
//! (or the in-process store used by tests).

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod telemetry;
pub mod unit_of_work;

// Re-export commonly used types
pub use app::AppState;
pub use modules::items;
pub use modules::math;
pub use modules::users;
