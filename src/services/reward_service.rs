use crate::database::DbPool;
use crate::entities::rewards;
use crate::error::{AppError, AppResult};
use crate::middlewares::AuthenticatedUser;
use crate::models::*;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set};

/// 优惠码前缀取名称前 3 个字符, 因此目录层直接拒绝更短的名称
const MIN_NAME_CHARS: usize = 3;

#[derive(Clone)]
pub struct RewardService {
    pool: DbPool,
}

impl RewardService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, reward_id: i64) -> AppResult<RewardResponse> {
        let reward = rewards::Entity::find_by_id(reward_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Reward not found".to_string()))?;

        Ok(reward.into())
    }

    /// 公开目录
    pub async fn list_all(&self) -> AppResult<Vec<RewardResponse>> {
        let rewards = rewards::Entity::find()
            .order_by_asc(rewards::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(rewards.into_iter().map(Into::into).collect())
    }

    /// 商家自己的目录
    pub async fn list_by_owner(&self, owner_id: i64) -> AppResult<Vec<RewardResponse>> {
        let rewards = rewards::Entity::find()
            .filter(rewards::Column::CreatedById.eq(owner_id))
            .order_by_asc(rewards::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(rewards.into_iter().map(Into::into).collect())
    }

    /// 创建奖励: 名称查重返回 409
    pub async fn create(
        &self,
        request: CreateRewardRequest,
        created_by: i64,
    ) -> AppResult<RewardResponse> {
        Self::validate_name(&request.name)?;
        Self::validate_cost(request.cost)?;
        Self::validate_stock(request.stock)?;

        let existing = rewards::Entity::find()
            .filter(rewards::Column::Name.eq(request.name.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "Reward name already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let reward = rewards::ActiveModel {
            name: Set(request.name),
            category: Set(request.category),
            cost: Set(request.cost),
            stock: Set(request.stock),
            created_by_id: Set(created_by),
            discount: Set(request.discount),
            campaign_name: Set(request.campaign_name),
            description: Set(request.description),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            auto_expire_after_redemption: Set(request.auto_expire_after_redemption.unwrap_or(false)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = reward.insert(&self.pool).await?;

        Ok(created.into())
    }

    /// 部分更新。所有权: 创建者本人或管理员
    pub async fn update(
        &self,
        reward_id: i64,
        request: UpdateRewardRequest,
        actor: &AuthenticatedUser,
    ) -> AppResult<RewardResponse> {
        let reward = rewards::Entity::find_by_id(reward_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Reward not found".to_string()))?;

        Self::check_ownership(&reward, actor)?;

        if let Some(name) = &request.name {
            Self::validate_name(name)?;
            if *name != reward.name {
                let existing = rewards::Entity::find()
                    .filter(rewards::Column::Name.eq(name.clone()))
                    .one(&self.pool)
                    .await?;
                if existing.is_some() {
                    return Err(AppError::Conflict(
                        "Reward name already exists".to_string(),
                    ));
                }
            }
        }
        if let Some(cost) = request.cost {
            Self::validate_cost(cost)?;
        }
        if let Some(stock) = request.stock {
            Self::validate_stock(stock)?;
        }

        let mut model = reward.into_active_model();
        if let Some(name) = request.name {
            model.name = Set(name);
        }
        if let Some(category) = request.category {
            model.category = Set(category);
        }
        if let Some(cost) = request.cost {
            model.cost = Set(cost);
        }
        if let Some(stock) = request.stock {
            model.stock = Set(stock);
        }
        if let Some(discount) = request.discount {
            model.discount = Set(Some(discount));
        }
        if let Some(campaign_name) = request.campaign_name {
            model.campaign_name = Set(Some(campaign_name));
        }
        if let Some(description) = request.description {
            model.description = Set(Some(description));
        }
        if let Some(start_date) = request.start_date {
            model.start_date = Set(Some(start_date));
        }
        if let Some(end_date) = request.end_date {
            model.end_date = Set(Some(end_date));
        }
        if let Some(auto_expire) = request.auto_expire_after_redemption {
            model.auto_expire_after_redemption = Set(auto_expire);
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 删除奖励。历史流水不级联, 只移除目录项
    pub async fn delete(&self, reward_id: i64, actor: &AuthenticatedUser) -> AppResult<()> {
        let reward = rewards::Entity::find_by_id(reward_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Reward not found".to_string()))?;

        Self::check_ownership(&reward, actor)?;

        rewards::Entity::delete_by_id(reward_id)
            .exec(&self.pool)
            .await?;

        Ok(())
    }

    fn check_ownership(reward: &rewards::Model, actor: &AuthenticatedUser) -> AppResult<()> {
        if actor.role != Role::Admin && reward.created_by_id != actor.id {
            return Err(AppError::Forbidden(
                "You do not own this reward".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_name(name: &str) -> AppResult<()> {
        if name.chars().count() < MIN_NAME_CHARS {
            return Err(AppError::ValidationError(
                "Reward name must be at least 3 characters".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_cost(cost: i64) -> AppResult<()> {
        if cost <= 0 {
            return Err(AppError::ValidationError(
                "Reward cost must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_stock(stock: i64) -> AppResult<()> {
        if stock < 0 {
            return Err(AppError::ValidationError(
                "Reward stock must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
