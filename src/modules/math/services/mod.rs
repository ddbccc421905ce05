mod math_service;

pub use math_service::MathService;
