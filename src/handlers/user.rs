use crate::middlewares::AuthenticatedUser;
use crate::models::*;
use crate::services::{RedemptionService, UserService};
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/user/profile",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取用户资料成功", body = UserResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_profile(
    user_service: web::Data<UserService>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse> {
    match user_service.get_profile(auth.id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/user/wallet",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取积分钱包成功", body = WalletResponse),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_wallet(
    user_service: web::Data<UserService>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse> {
    match user_service.get_wallet(auth.id).await {
        Ok(wallet) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": wallet
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/user/redeem",
    tag = "user",
    request_body = RedeemRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "兑换成功", body = TransactionResponse),
        (status = 400, description = "积分不足或库存不足"),
        (status = 401, description = "未授权"),
        (status = 404, description = "奖励不存在")
    )
)]
pub async fn redeem(
    redemption_service: web::Data<RedemptionService>,
    auth: AuthenticatedUser,
    request: web::Json<RedeemRequest>,
) -> Result<HttpResponse> {
    match redemption_service.redeem(auth.id, request.reward_id).await {
        Ok(transaction) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": transaction,
            "message": "Reward redeemed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/user/transactions",
    tag = "user",
    params(
        ("page" = Option<i64>, Query, description = "页码"),
        ("page_size" = Option<i64>, Query, description = "每页数量")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取兑换历史成功"),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_transactions(
    redemption_service: web::Data<RedemptionService>,
    auth: AuthenticatedUser,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match redemption_service
        .list_user_transactions(auth.id, &params)
        .await
    {
        Ok(transactions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": transactions
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .route("/profile", web::get().to(get_profile))
            .route("/wallet", web::get().to(get_wallet))
            .route("/redeem", web::post().to(redeem))
            .route("/transactions", web::get().to(get_transactions)),
    );
}
