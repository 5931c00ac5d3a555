use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 平台总览 (管理员仪表盘)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminAnalyticsResponse {
    pub total_users: i64,
    pub total_partners: i64,
    pub total_rewards: i64,
    pub total_redemptions: i64,
    pub most_active_partners: Vec<ActivePartner>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivePartner {
    pub username: String,
    pub redemption_count: i64,
}

/// 商家侧总览
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PartnerAnalyticsResponse {
    pub total_redemptions: i64,
    pub most_popular_rewards: Vec<PopularReward>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PopularReward {
    pub name: String,
    pub redemption_count: i64,
}
