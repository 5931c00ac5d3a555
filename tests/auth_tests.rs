//! 注册 / OTP 验证 / 登录流程与未验证账号清理的集成测试。
//! 邮件服务在空 api_key 下走干跑分支, 不发起真实请求。

mod common;

use chrono::{Duration, Utc};
use common::{seed_user_with_age, setup_test_db};
use rewardx_backend::config::MailConfig;
use rewardx_backend::database::DbPool;
use rewardx_backend::entities::users;
use rewardx_backend::error::AppError;
use rewardx_backend::external::EmailService;
use rewardx_backend::models::*;
use rewardx_backend::services::{AuthService, UserService};
use rewardx_backend::utils::JwtService;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};

fn auth_service(pool: &DbPool) -> AuthService {
    AuthService::new(
        pool.clone(),
        JwtService::new("test-secret", 3600),
        EmailService::new(MailConfig::default()),
    )
}

async fn find_by_email(pool: &DbPool, email: &str) -> Option<users::Model> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(pool)
        .await
        .unwrap()
}

fn register_request(email: &str, username: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        username: username.to_string(),
        password: "Password123".to_string(),
        role: None,
    }
}

#[tokio::test]
async fn register_verify_login_happy_path() {
    let pool = setup_test_db().await;
    let service = auth_service(&pool);

    service
        .register(register_request("alice@example.com", "alice"))
        .await
        .unwrap();

    let user = find_by_email(&pool, "alice@example.com").await.unwrap();
    assert_eq!(user.role, Role::User);
    assert_eq!(user.points, 400);
    assert!(!user.is_verified);
    let otp = user.otp_code.clone().unwrap();
    assert_eq!(otp.len(), 6);

    // 未验证前登录被拒
    match service
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "Password123".to_string(),
        })
        .await
    {
        Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Account not verified"),
        other => panic!("expected Forbidden, got {other:?}"),
    }

    service
        .verify_otp(VerifyOtpRequest {
            email: "alice@example.com".to_string(),
            otp,
        })
        .await
        .unwrap();

    let response = service
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.role, Role::User);
    assert_eq!(response.expires_in, 3600);
    assert!(!response.token.is_empty());
}

#[tokio::test]
async fn duplicate_registration_leaves_original_untouched() {
    let pool = setup_test_db().await;
    let service = auth_service(&pool);

    service
        .register(register_request("alice@example.com", "alice"))
        .await
        .unwrap();

    match service
        .register(register_request("alice@example.com", "impostor"))
        .await
    {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, "Email already registered"),
        other => panic!("expected Conflict, got {other:?}"),
    }

    let user = find_by_email(&pool, "alice@example.com").await.unwrap();
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn register_rejects_invalid_input() {
    let pool = setup_test_db().await;
    let service = auth_service(&pool);

    assert!(matches!(
        service.register(register_request("not-an-email", "bob")).await,
        Err(AppError::ValidationError(_))
    ));

    let mut short_password = register_request("bob@example.com", "bob");
    short_password.password = "short".to_string();
    assert!(matches!(
        service.register(short_password).await,
        Err(AppError::ValidationError(_))
    ));
}

/// 注册入口不允许自封管理员
#[tokio::test]
async fn register_coerces_admin_role_to_user() {
    let pool = setup_test_db().await;
    let service = auth_service(&pool);

    let mut request = register_request("sneaky@example.com", "sneaky");
    request.role = Some(Role::Admin);
    service.register(request).await.unwrap();

    let user = find_by_email(&pool, "sneaky@example.com").await.unwrap();
    assert_eq!(user.role, Role::User);
}

#[tokio::test]
async fn expired_otp_rejected_even_when_code_matches() {
    let pool = setup_test_db().await;
    let service = auth_service(&pool);

    service
        .register(register_request("alice@example.com", "alice"))
        .await
        .unwrap();

    let user = find_by_email(&pool, "alice@example.com").await.unwrap();
    let otp = user.otp_code.clone().unwrap();

    let mut model = user.into_active_model();
    model.otp_expires_at = Set(Some(Utc::now() - Duration::minutes(1)));
    model.update(&pool).await.unwrap();

    match service
        .verify_otp(VerifyOtpRequest {
            email: "alice@example.com".to_string(),
            otp,
        })
        .await
    {
        Err(AppError::BusinessRule(msg)) => assert_eq!(msg, "OTP expired"),
        other => panic!("expected BusinessRule, got {other:?}"),
    }
}

#[tokio::test]
async fn incorrect_otp_rejected_and_reverify_is_idempotent() {
    let pool = setup_test_db().await;
    let service = auth_service(&pool);

    service
        .register(register_request("alice@example.com", "alice"))
        .await
        .unwrap();
    let user = find_by_email(&pool, "alice@example.com").await.unwrap();
    let otp = user.otp_code.clone().unwrap();
    let wrong = if otp == "000000" { "111111" } else { "000000" };

    match service
        .verify_otp(VerifyOtpRequest {
            email: "alice@example.com".to_string(),
            otp: wrong.to_string(),
        })
        .await
    {
        Err(AppError::BusinessRule(msg)) => assert_eq!(msg, "Incorrect OTP"),
        other => panic!("expected BusinessRule, got {other:?}"),
    }

    // 正确验证一次之后, 重复验证是空操作
    for _ in 0..2 {
        service
            .verify_otp(VerifyOtpRequest {
                email: "alice@example.com".to_string(),
                otp: otp.clone(),
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn login_does_not_reveal_which_credential_failed() {
    let pool = setup_test_db().await;
    let service = auth_service(&pool);

    service
        .register(register_request("alice@example.com", "alice"))
        .await
        .unwrap();

    let wrong_password = service
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "WrongPassword1".to_string(),
        })
        .await;
    let unknown_email = service
        .login(LoginRequest {
            email: "nobody@example.com".to_string(),
            password: "Password123".to_string(),
        })
        .await;

    for result in [wrong_password, unknown_email] {
        match result {
            Err(AppError::AuthError(msg)) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("expected AuthError, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn admin_created_partner_is_born_verified() {
    let pool = setup_test_db().await;
    let service = auth_service(&pool);

    let partner = service
        .create_partner(CreatePartnerRequest {
            email: "shop@example.com".to_string(),
            username: "coffeehouse".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(partner.role, Role::Partner);
    assert_eq!(partner.points, 0);
    assert!(partner.is_verified);

    // 无需 OTP 即可登录
    let response = service
        .login(LoginRequest {
            email: "shop@example.com".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.role, Role::Partner);
}

/// 清理只删超过阈值的未验证账号, 刚注册的和已验证的都保留
#[tokio::test]
async fn cleanup_removes_only_stale_unverified_accounts() {
    let pool = setup_test_db().await;
    let service = UserService::new(pool.clone());

    let stale = seed_user_with_age(&pool, "stale@example.com", 400, false, Duration::minutes(31)).await;
    let fresh = seed_user_with_age(&pool, "fresh@example.com", 400, false, Duration::minutes(29)).await;
    let verified =
        seed_user_with_age(&pool, "old@example.com", 400, true, Duration::minutes(90)).await;

    let deleted = service
        .delete_unverified_older_than(Duration::minutes(30))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    assert!(users::Entity::find_by_id(stale.id)
        .one(&pool)
        .await
        .unwrap()
        .is_none());
    assert!(users::Entity::find_by_id(fresh.id)
        .one(&pool)
        .await
        .unwrap()
        .is_some());
    assert!(users::Entity::find_by_id(verified.id)
        .one(&pool)
        .await
        .unwrap()
        .is_some());
}
