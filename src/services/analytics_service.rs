use crate::database::DbPool;
use crate::entities::{rewards, transactions, users};
use crate::error::AppResult;
use crate::models::*;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

#[derive(Debug, FromQueryResult)]
struct ActivePartnerRow {
    username: String,
    redemption_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct PopularRewardRow {
    name: String,
    redemption_count: i64,
}

/// 只读聚合查询, 不触碰兑换路径
#[derive(Clone)]
pub struct AnalyticsService {
    pool: DbPool,
}

impl AnalyticsService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 平台总览: 各角色计数 + 兑换量 Top5 商家
    pub async fn admin_overview(&self) -> AppResult<AdminAnalyticsResponse> {
        let total_users = users::Entity::find()
            .filter(users::Column::Role.eq(Role::User))
            .count(&self.pool)
            .await? as i64;

        let total_partners = users::Entity::find()
            .filter(users::Column::Role.eq(Role::Partner))
            .count(&self.pool)
            .await? as i64;

        let total_rewards = rewards::Entity::find().count(&self.pool).await? as i64;

        let total_redemptions = transactions::Entity::find().count(&self.pool).await? as i64;

        // transactions -> rewards -> users(owner), 按商家用户名聚合
        let most_active_partners = transactions::Entity::find()
            .select_only()
            .column(users::Column::Username)
            .column_as(transactions::Column::Id.count(), "redemption_count")
            .join(JoinType::InnerJoin, transactions::Relation::Reward.def())
            .join(JoinType::InnerJoin, rewards::Relation::Owner.def())
            .filter(users::Column::Role.eq(Role::Partner))
            .group_by(users::Column::Username)
            .order_by_desc(Expr::col(Alias::new("redemption_count")))
            .limit(5)
            .into_model::<ActivePartnerRow>()
            .all(&self.pool)
            .await?;

        Ok(AdminAnalyticsResponse {
            total_users,
            total_partners,
            total_rewards,
            total_redemptions,
            most_active_partners: most_active_partners
                .into_iter()
                .map(|row| ActivePartner {
                    username: row.username,
                    redemption_count: row.redemption_count,
                })
                .collect(),
        })
    }

    /// 商家总览: 自家奖励的兑换总量与 Top5 热门奖励
    pub async fn partner_overview(&self, owner_id: i64) -> AppResult<PartnerAnalyticsResponse> {
        let total_redemptions = transactions::Entity::find()
            .join(JoinType::InnerJoin, transactions::Relation::Reward.def())
            .filter(rewards::Column::CreatedById.eq(owner_id))
            .count(&self.pool)
            .await? as i64;

        let most_popular_rewards = transactions::Entity::find()
            .select_only()
            .column(rewards::Column::Name)
            .column_as(transactions::Column::Id.count(), "redemption_count")
            .join(JoinType::InnerJoin, transactions::Relation::Reward.def())
            .filter(rewards::Column::CreatedById.eq(owner_id))
            .group_by(rewards::Column::Name)
            .order_by_desc(Expr::col(Alias::new("redemption_count")))
            .limit(5)
            .into_model::<PopularRewardRow>()
            .all(&self.pool)
            .await?;

        Ok(PartnerAnalyticsResponse {
            total_redemptions,
            most_popular_rewards: most_popular_rewards
                .into_iter()
                .map(|row| PopularReward {
                    name: row.name,
                    redemption_count: row.redemption_count,
                })
                .collect(),
        })
    }
}
