pub mod analytics;
pub mod common;
pub mod pagination;
pub mod reward;
pub mod transaction;
pub mod user;

pub use analytics::*;
pub use common::*;
pub use pagination::*;
pub use reward::*;
pub use transaction::*;
pub use user::*;
