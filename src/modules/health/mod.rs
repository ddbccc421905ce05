pub mod controllers;
pub mod probe;

pub use controllers::configure;
pub use probe::DatabaseProbe;
