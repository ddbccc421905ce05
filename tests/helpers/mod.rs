// Shared helpers for the integration and contract suites.
//
// Integration tests drive the full route table in-process with
// `actix_web::test` against the in-memory store. Contract tests spawn a real
// server on a random port with `actix-test` and talk to it through `awc`.
// MySQL-backed tests read TEST_DATABASE_URL and are #[ignore]d by default.
//
// Usage (from a test crate):
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;
#![allow(dead_code)]

pub mod assertions;
pub mod test_server;

// Re-export commonly used types and functions
pub use assertions::*;
pub use test_app::*;
pub use test_data::*;
pub use test_database::*;
pub use test_server::*;
