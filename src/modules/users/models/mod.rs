mod user;

pub use user::{NewUser, User, UserMetrics, UserMetricsRequest, UserRequest, UserResponse};
