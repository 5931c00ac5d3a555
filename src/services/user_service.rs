use crate::database::DbPool;
use crate::entities::users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

#[derive(Clone)]
pub struct UserService {
    pool: DbPool,
}

impl UserService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 获取用户个人资料
    pub async fn get_profile(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    /// 获取积分钱包
    pub async fn get_wallet(&self, user_id: i64) -> AppResult<WalletResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(WalletResponse {
            points: user.points,
        })
    }

    /// 列出全部商家账号 (管理员视图)
    pub async fn list_partners(&self) -> AppResult<Vec<UserResponse>> {
        let partners = users::Entity::find()
            .filter(users::Column::Role.eq(Role::Partner))
            .order_by_asc(users::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(partners.into_iter().map(Into::into).collect())
    }

    /// 删除超过给定时长仍未验证的账号, 返回删除行数。
    /// 由后台清理任务周期性调用, 与兑换路径没有顺序依赖。
    pub async fn delete_unverified_older_than(&self, age: Duration) -> AppResult<u64> {
        let cutoff = Utc::now() - age;

        let result = users::Entity::delete_many()
            .filter(users::Column::IsVerified.eq(false))
            .filter(users::Column::CreatedAt.lt(cutoff))
            .exec(&self.pool)
            .await?;

        Ok(result.rows_affected)
    }
}
