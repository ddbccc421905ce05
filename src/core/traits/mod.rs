pub mod repository;

pub use repository::{EntityId, Repository};
