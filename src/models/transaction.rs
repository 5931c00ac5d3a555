use crate::entities::transactions;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 兑换流水状态 (流水只增不改, 目前只有 Completed)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum TransactionStatus {
    #[sea_orm(string_value = "Completed")]
    Completed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RedeemRequest {
    #[schema(example = 1)]
    pub reward_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    pub user_id: i64,
    pub reward_id: i64,
    pub status: TransactionStatus,
    pub coupon_code: String,
    pub points_used: i64,
    pub created_at: DateTime<Utc>,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(t: transactions::Model) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            reward_id: t.reward_id,
            status: t.status,
            coupon_code: t.coupon_code,
            points_used: t.points_used,
            created_at: t.created_at,
        }
    }
}
