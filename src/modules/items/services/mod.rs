mod item_service;
pub mod pricing;

pub use item_service::ItemService;
