use crate::database::DbPool;
use crate::entities::users;
use crate::error::{AppError, AppResult};
use crate::external::EmailService;
use crate::models::*;
use crate::utils::{self, JwtService};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};

/// 新注册账号的初始积分
const STARTING_POINTS: i64 = 400;
/// OTP 有效期 (分钟)
const OTP_TTL_MINUTES: i64 = 5;

#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    jwt_service: JwtService,
    email_service: EmailService,
}

impl AuthService {
    pub fn new(pool: DbPool, jwt_service: JwtService, email_service: EmailService) -> Self {
        Self {
            pool,
            jwt_service,
            email_service,
        }
    }

    /// 注册: 邮箱查重 -> 哈希密码 -> 生成 OTP -> 入库 -> 发送验证邮件。
    /// 邮件发送永远在持久化之后, 不在任何临界区内。
    pub async fn register(&self, request: RegisterRequest) -> AppResult<()> {
        utils::validate_email(&request.email)?;
        utils::validate_password(&request.password)?;
        if request.username.trim().is_empty() {
            return Err(AppError::ValidationError("Username required".to_string()));
        }

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(request.email.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        // 仅允许 user / partner, 管理员账号不通过注册入口创建
        let role = match request.role {
            Some(Role::Partner) => Role::Partner,
            _ => Role::User,
        };

        let password_hash = utils::hash_password(&request.password)?;
        let otp = utils::generate_otp();
        let now = Utc::now();

        let user = users::ActiveModel {
            username: Set(request.username),
            email: Set(request.email.clone()),
            password_hash: Set(password_hash),
            role: Set(role),
            points: Set(STARTING_POINTS),
            is_verified: Set(false),
            otp_code: Set(Some(otp.clone())),
            otp_expires_at: Set(Some(now + Duration::minutes(OTP_TTL_MINUTES))),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        user.insert(&self.pool).await?;

        // 发送失败返回 500; 未验证的记录最终由清理任务回收
        self.email_service
            .send_otp_email(&request.email, &otp)
            .await?;

        Ok(())
    }

    /// 验证 OTP。已验证账号的重复验证是幂等空操作, 但仍校验验证码本身。
    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> AppResult<()> {
        if request.email.is_empty() {
            return Err(AppError::ValidationError("Email required".to_string()));
        }

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(request.email.clone()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        // 过期仅对未验证账号有意义; 即使验证码字符串完全匹配也拒绝
        if !user.is_verified {
            let expired = match user.otp_expires_at {
                Some(expires_at) => Utc::now() > expires_at,
                None => true,
            };
            if expired {
                return Err(AppError::BusinessRule("OTP expired".to_string()));
            }
        }

        if user.otp_code.as_deref() != Some(request.otp.as_str()) {
            return Err(AppError::BusinessRule("Incorrect OTP".to_string()));
        }

        if user.is_verified {
            return Ok(());
        }

        let mut model = user.into_active_model();
        model.is_verified = Set(true);
        model.updated_at = Set(Utc::now());
        model.update(&self.pool).await?;

        Ok(())
    }

    /// 登录: 账号不存在与密码错误同样返回 401, 未验证账号返回 403
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        if request.email.is_empty() {
            return Err(AppError::ValidationError("Email required".to_string()));
        }

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(request.email.clone()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;

        if !utils::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        }

        if !user.is_verified {
            return Err(AppError::Forbidden("Account not verified".to_string()));
        }

        let token = self.jwt_service.generate_token(user.id, user.role)?;

        Ok(LoginResponse {
            token,
            role: user.role,
            expires_in: self.jwt_service.expires_in(),
        })
    }

    /// 管理员创建商家账号: 无需 OTP 流程, 创建即已验证
    pub async fn create_partner(&self, request: CreatePartnerRequest) -> AppResult<UserResponse> {
        utils::validate_email(&request.email)?;
        utils::validate_password(&request.password)?;
        if request.username.trim().is_empty() {
            return Err(AppError::ValidationError("Username required".to_string()));
        }

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(request.email.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = utils::hash_password(&request.password)?;
        let now = Utc::now();

        let user = users::ActiveModel {
            username: Set(request.username),
            email: Set(request.email),
            password_hash: Set(password_hash),
            role: Set(Role::Partner),
            points: Set(0),
            is_verified: Set(true),
            otp_code: Set(None),
            otp_expires_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = user.insert(&self.pool).await?;

        Ok(created.into())
    }
}
