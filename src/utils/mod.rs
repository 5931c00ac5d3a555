pub mod coupon;
pub mod email;
pub mod jwt;
pub mod otp;
pub mod password;

pub use coupon::{coupon_prefix, generate_coupon_code, generate_unique_coupon_code};
pub use email::validate_email;
pub use jwt::*;
pub use otp::generate_otp;
pub use password::*;
