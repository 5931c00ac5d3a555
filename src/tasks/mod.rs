//! Background scheduled tasks for the application.
//!
//! Currently the only recurring job is the unverified-account sweep: accounts
//! that never completed OTP verification are purged once they are older than
//! 30 minutes. Call `spawn_all` once during startup to launch it.

use crate::services::UserService;
use chrono::Duration;

/// 清理阈值与执行周期 (分钟)
const CLEANUP_THRESHOLD_MINUTES: i64 = 30;
const CLEANUP_INTERVAL_SECS: u64 = 30 * 60;

/// Spawn all background tasks.
///
/// Notes
/// - The sweep only touches rows matching `unverified AND age > threshold`;
///   it has no ordering dependency on redemption traffic.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(user_service: UserService) {
    // 每 30 分钟清理一次超时未验证账号
    {
        let svc = user_service.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(CLEANUP_INTERVAL_SECS)).await;
                match svc
                    .delete_unverified_older_than(Duration::minutes(CLEANUP_THRESHOLD_MINUTES))
                    .await
                {
                    Ok(n) if n > 0 => log::info!("Cleaned up {n} unverified users"),
                    Ok(_) => {}
                    Err(e) => log::error!("Cleanup of unverified users failed: {e:?}"),
                }
            }
        });
    }
}
