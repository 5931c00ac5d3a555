use crate::database::DbPool;
use crate::entities::{rewards, transactions, users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::generate_unique_coupon_code;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 按 id 维护的进程内锁表。条目只增不删, 上限是出现过的不同 id 数。
#[derive(Clone, Default)]
struct LockTable {
    inner: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl LockTable {
    async fn acquire(&self, id: i64) -> OwnedMutexGuard<()> {
        let cell = {
            let mut map = self.inner.lock().await;
            map.entry(id).or_default().clone()
        };
        cell.lock_owned().await
    }
}

/// 兑换引擎。
///
/// 同一用户或同一奖励的两次兑换不允许交错执行读-校验-写序列,
/// 否则双方都会基于过期快照通过校验, 造成积分透支或超卖。
/// 这里用两层进程内锁 (先用户锁, 后奖励锁) 划定临界区, SQLite 与
/// Postgres 行为一致; 数据库事务内的条件更新作为第二道防线。
#[derive(Clone)]
pub struct RedemptionService {
    pool: DbPool,
    user_locks: LockTable,
    reward_locks: LockTable,
}

impl RedemptionService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            user_locks: LockTable::default(),
            reward_locks: LockTable::default(),
        }
    }

    /// 兑换奖励:
    /// 1. 取用户锁再取奖励锁 (固定两层顺序, 不会成环死锁)
    /// 2. 并发读取用户与奖励, 任一缺失立即返回 404
    /// 3. 依次校验: 已验证 -> 积分充足 -> 有库存 (积分校验优先)
    /// 4. 生成全局唯一优惠码
    /// 5. 单个数据库事务内条件扣减积分/库存并写入流水, 全部成功或全部回滚
    pub async fn redeem(&self, user_id: i64, reward_id: i64) -> AppResult<TransactionResponse> {
        let _user_guard = self.user_locks.acquire(user_id).await;
        let _reward_guard = self.reward_locks.acquire(reward_id).await;

        let (user, reward) = tokio::try_join!(
            users::Entity::find_by_id(user_id).one(&self.pool),
            rewards::Entity::find_by_id(reward_id).one(&self.pool),
        )?;
        let user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let reward = reward.ok_or_else(|| AppError::NotFound("Reward not found".to_string()))?;

        if !user.is_verified {
            return Err(AppError::BusinessRule("Account not verified".to_string()));
        }
        if user.points < reward.cost {
            return Err(AppError::BusinessRule("Insufficient points".to_string()));
        }
        if reward.stock <= 0 {
            return Err(AppError::BusinessRule("Reward out of stock".to_string()));
        }

        let coupon_code = generate_unique_coupon_code(&self.pool, &reward.name).await?;
        let points_used = reward.cost;
        let now = Utc::now();

        // 三笔写入要么全部提交, 要么全部回滚; 提前返回即丢弃事务 = 回滚,
        // 调用方中途取消同理, 不会出现只扣一半的状态。
        let txn = self.pool.begin().await?;

        let stock_update = rewards::Entity::update_many()
            .col_expr(
                rewards::Column::Stock,
                Expr::col(rewards::Column::Stock).sub(1),
            )
            .col_expr(rewards::Column::UpdatedAt, Expr::value(now))
            .filter(rewards::Column::Id.eq(reward_id))
            .filter(rewards::Column::Stock.gt(0))
            .exec(&txn)
            .await?;
        if stock_update.rows_affected == 0 {
            return Err(AppError::BusinessRule("Reward out of stock".to_string()));
        }

        let points_update = users::Entity::update_many()
            .col_expr(
                users::Column::Points,
                Expr::col(users::Column::Points).sub(points_used),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Id.eq(user_id))
            .filter(users::Column::Points.gte(points_used))
            .exec(&txn)
            .await?;
        if points_update.rows_affected == 0 {
            return Err(AppError::BusinessRule("Insufficient points".to_string()));
        }

        let transaction = transactions::ActiveModel {
            user_id: Set(user_id),
            reward_id: Set(reward_id),
            status: Set(TransactionStatus::Completed),
            coupon_code: Set(coupon_code),
            // 成本快照, 不随奖励后续改价变化
            points_used: Set(points_used),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "Redemption completed: user={user_id} reward={reward_id} points_used={points_used}"
        );

        Ok(transaction.into())
    }

    /// 用户兑换历史, 新的在前
    pub async fn list_user_transactions(
        &self,
        user_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<TransactionResponse>> {
        let offset = params.get_offset();
        let limit = params.get_limit();

        let total = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await? as i64;

        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .offset(offset as u64)
            .limit(limit as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(Into::into).collect(),
            params.page.unwrap_or(1).max(1),
            limit,
            total,
        ))
    }
}
