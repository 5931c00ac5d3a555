pub mod analytics_service;
pub mod auth_service;
pub mod redemption_service;
pub mod reward_service;
pub mod user_service;

pub use analytics_service::*;
pub use auth_service::*;
pub use redemption_service::*;
pub use reward_service::*;
pub use user_service::*;
