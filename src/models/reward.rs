use crate::entities::rewards;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRewardRequest {
    #[schema(example = "Amazon Gift Card")]
    pub name: String,
    #[schema(example = "giftcard")]
    pub category: String,
    #[schema(example = 200)]
    pub cost: i64,
    #[schema(example = 50)]
    pub stock: i64,
    pub discount: Option<f64>,
    pub campaign_name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub auto_expire_after_redemption: Option<bool>,
}

/// 部分更新: 仅提供的字段会被写入
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRewardRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub cost: Option<i64>,
    pub stock: Option<i64>,
    pub discount: Option<f64>,
    pub campaign_name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub auto_expire_after_redemption: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RewardResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub cost: i64,
    pub stock: i64,
    pub created_by_id: i64,
    pub discount: Option<f64>,
    pub campaign_name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub auto_expire_after_redemption: bool,
    pub created_at: DateTime<Utc>,
}

impl From<rewards::Model> for RewardResponse {
    fn from(reward: rewards::Model) -> Self {
        Self {
            id: reward.id,
            name: reward.name,
            category: reward.category,
            cost: reward.cost,
            stock: reward.stock,
            created_by_id: reward.created_by_id,
            discount: reward.discount,
            campaign_name: reward.campaign_name,
            description: reward.description,
            start_date: reward.start_date,
            end_date: reward.end_date,
            auto_expire_after_redemption: reward.auto_expire_after_redemption,
            created_at: reward.created_at,
        }
    }
}
