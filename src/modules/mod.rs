pub mod health;
pub mod items;
pub mod math;
pub mod users;
