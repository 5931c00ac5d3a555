//! 奖励目录管理 (创建/更新/删除的校验与所有权) 与统计聚合的集成测试。

mod common;

use common::{seed_partner, seed_reward, seed_user, setup_test_db};
use rewardx_backend::error::AppError;
use rewardx_backend::middlewares::AuthenticatedUser;
use rewardx_backend::models::*;
use rewardx_backend::services::{AnalyticsService, RedemptionService, RewardService};

fn create_request(name: &str, cost: i64, stock: i64) -> CreateRewardRequest {
    CreateRewardRequest {
        name: name.to_string(),
        category: "test".to_string(),
        cost,
        stock,
        discount: None,
        campaign_name: None,
        description: None,
        start_date: None,
        end_date: None,
        auto_expire_after_redemption: None,
    }
}

#[tokio::test]
async fn create_and_list_rewards() {
    let pool = setup_test_db().await;
    let partner = seed_partner(&pool, "shop@example.com").await;
    let service = RewardService::new(pool.clone());

    let created = service
        .create(create_request("Coffee Voucher", 150, 5), partner.id)
        .await
        .unwrap();
    assert_eq!(created.name, "Coffee Voucher");
    assert_eq!(created.cost, 150);
    assert_eq!(created.stock, 5);

    let all = service.list_all().await.unwrap();
    assert_eq!(all.len(), 1);

    let mine = service.list_by_owner(partner.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(service.list_by_owner(9999).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_reward_name_is_conflict() {
    let pool = setup_test_db().await;
    let partner = seed_partner(&pool, "shop@example.com").await;
    let other = seed_partner(&pool, "other@example.com").await;
    let service = RewardService::new(pool.clone());

    service
        .create(create_request("Coffee Voucher", 150, 5), partner.id)
        .await
        .unwrap();

    // 名称全局唯一, 跨商家同样冲突
    match service
        .create(create_request("Coffee Voucher", 99, 1), other.id)
        .await
    {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, "Reward name already exists"),
        result => panic!("expected Conflict, got {result:?}"),
    }
}

#[tokio::test]
async fn create_rejects_invalid_fields() {
    let pool = setup_test_db().await;
    let partner = seed_partner(&pool, "shop@example.com").await;
    let service = RewardService::new(pool.clone());

    // 名称不足 3 个字符无法派生优惠码前缀
    assert!(matches!(
        service.create(create_request("Ab", 100, 5), partner.id).await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        service.create(create_request("Free Item", 0, 5), partner.id).await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        service
            .create(create_request("Ghost Item", 100, -1), partner.id)
            .await,
        Err(AppError::ValidationError(_))
    ));
}

#[tokio::test]
async fn partner_cannot_touch_rewards_they_do_not_own() {
    let pool = setup_test_db().await;
    let owner = seed_partner(&pool, "owner@example.com").await;
    let intruder = seed_partner(&pool, "intruder@example.com").await;
    let reward = seed_reward(&pool, "Coffee Voucher", 150, 5, owner.id).await;
    let service = RewardService::new(pool.clone());

    let actor = AuthenticatedUser {
        id: intruder.id,
        role: Role::Partner,
    };
    let update = UpdateRewardRequest {
        name: None,
        category: None,
        cost: Some(10),
        stock: None,
        discount: None,
        campaign_name: None,
        description: None,
        start_date: None,
        end_date: None,
        auto_expire_after_redemption: None,
    };

    match service.update(reward.id, update, &actor).await {
        Err(AppError::Forbidden(msg)) => assert_eq!(msg, "You do not own this reward"),
        result => panic!("expected Forbidden, got {result:?}"),
    }
    match service.delete(reward.id, &actor).await {
        Err(AppError::Forbidden(msg)) => assert_eq!(msg, "You do not own this reward"),
        result => panic!("expected Forbidden, got {result:?}"),
    }
}

/// 管理员可以绕过所有权限制修改与删除任意奖励
#[tokio::test]
async fn admin_overrides_ownership() {
    let pool = setup_test_db().await;
    let owner = seed_partner(&pool, "owner@example.com").await;
    let reward = seed_reward(&pool, "Coffee Voucher", 150, 5, owner.id).await;
    let service = RewardService::new(pool.clone());

    let admin = AuthenticatedUser {
        id: 424242,
        role: Role::Admin,
    };
    let update = UpdateRewardRequest {
        name: None,
        category: None,
        cost: Some(200),
        stock: Some(10),
        discount: None,
        campaign_name: None,
        description: None,
        start_date: None,
        end_date: None,
        auto_expire_after_redemption: None,
    };

    let updated = service.update(reward.id, update, &admin).await.unwrap();
    assert_eq!(updated.cost, 200);
    assert_eq!(updated.stock, 10);

    service.delete(reward.id, &admin).await.unwrap();
    match service.get(reward.id).await {
        Err(AppError::NotFound(_)) => {}
        result => panic!("expected NotFound, got {result:?}"),
    }
}

#[tokio::test]
async fn rename_to_existing_name_is_conflict() {
    let pool = setup_test_db().await;
    let owner = seed_partner(&pool, "owner@example.com").await;
    let first = seed_reward(&pool, "Coffee Voucher", 150, 5, owner.id).await;
    seed_reward(&pool, "Tea Voucher", 100, 5, owner.id).await;
    let service = RewardService::new(pool.clone());

    let actor = AuthenticatedUser {
        id: owner.id,
        role: Role::Partner,
    };
    let update = UpdateRewardRequest {
        name: Some("Tea Voucher".to_string()),
        category: None,
        cost: None,
        stock: None,
        discount: None,
        campaign_name: None,
        description: None,
        start_date: None,
        end_date: None,
        auto_expire_after_redemption: None,
    };

    assert!(matches!(
        service.update(first.id, update, &actor).await,
        Err(AppError::Conflict(_))
    ));
}

/// 平台与商家统计基于真实兑换流水聚合
#[tokio::test]
async fn analytics_reflect_redemption_traffic() {
    let pool = setup_test_db().await;
    let busy = seed_partner(&pool, "busy@example.com").await;
    let quiet = seed_partner(&pool, "quiet@example.com").await;
    let popular = seed_reward(&pool, "Popular Item", 10, 100, busy.id).await;
    let niche = seed_reward(&pool, "Niche Item", 10, 100, busy.id).await;
    let unsold = seed_reward(&pool, "Unsold Item", 10, 100, quiet.id).await;

    let redemption = RedemptionService::new(pool.clone());
    for i in 0..3 {
        let user = seed_user(&pool, &format!("user{i}@example.com"), 400, true).await;
        redemption.redeem(user.id, popular.id).await.unwrap();
        if i == 0 {
            redemption.redeem(user.id, niche.id).await.unwrap();
        }
    }

    let analytics = AnalyticsService::new(pool.clone());

    let admin = analytics.admin_overview().await.unwrap();
    assert_eq!(admin.total_users, 3);
    assert_eq!(admin.total_partners, 2);
    assert_eq!(admin.total_rewards, 3);
    assert_eq!(admin.total_redemptions, 4);
    assert_eq!(admin.most_active_partners.len(), 1);
    assert_eq!(admin.most_active_partners[0].username, "busy");
    assert_eq!(admin.most_active_partners[0].redemption_count, 4);

    let busy_view = analytics.partner_overview(busy.id).await.unwrap();
    assert_eq!(busy_view.total_redemptions, 4);
    assert_eq!(busy_view.most_popular_rewards.len(), 2);
    assert_eq!(busy_view.most_popular_rewards[0].name, "Popular Item");
    assert_eq!(busy_view.most_popular_rewards[0].redemption_count, 3);
    assert_eq!(busy_view.most_popular_rewards[1].name, "Niche Item");
    assert_eq!(busy_view.most_popular_rewards[1].redemption_count, 1);

    let quiet_view = analytics.partner_overview(quiet.id).await.unwrap();
    assert_eq!(quiet_view.total_redemptions, 0);
    assert!(quiet_view.most_popular_rewards.is_empty());
    let _ = unsold;
}
