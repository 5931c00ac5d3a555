pub mod admin;
pub mod auth;
pub mod partner;
pub mod rewards;
pub mod user;

pub use admin::admin_config;
pub use auth::auth_config;
pub use partner::partner_config;
pub use rewards::rewards_config;
pub use user::user_config;
