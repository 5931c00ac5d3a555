use crate::middlewares::AuthenticatedUser;
use crate::models::*;
use crate::services::{AnalyticsService, AuthService, RewardService, UserService};
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/addreward",
    tag = "admin",
    request_body = CreateRewardRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "奖励创建成功", body = RewardResponse),
        (status = 403, description = "需要管理员角色"),
        (status = 409, description = "奖励名称已存在")
    )
)]
pub async fn add_reward(
    reward_service: web::Data<RewardService>,
    auth: AuthenticatedUser,
    request: web::Json<CreateRewardRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Admin) {
        return Ok(e.error_response());
    }
    match reward_service.create(request.into_inner(), auth.id).await {
        Ok(reward) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": reward,
            "message": "Reward added"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/addpartner",
    tag = "admin",
    request_body = CreatePartnerRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "商家账号创建成功", body = UserResponse),
        (status = 403, description = "需要管理员角色"),
        (status = 409, description = "邮箱已注册")
    )
)]
pub async fn add_partner(
    auth_service: web::Data<AuthService>,
    auth: AuthenticatedUser,
    request: web::Json<CreatePartnerRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Admin) {
        return Ok(e.error_response());
    }
    match auth_service.create_partner(request.into_inner()).await {
        Ok(partner) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": partner,
            "message": "Partner account created"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/getpartners",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取商家列表成功", body = [UserResponse]),
        (status = 403, description = "需要管理员角色")
    )
)]
pub async fn get_partners(
    user_service: web::Data<UserService>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Admin) {
        return Ok(e.error_response());
    }
    match user_service.list_partners().await {
        Ok(partners) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": partners
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/rewards/{id}",
    tag = "admin",
    request_body = UpdateRewardRequest,
    params(("id" = i64, Path, description = "奖励 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "奖励更新成功", body = RewardResponse),
        (status = 403, description = "需要管理员角色"),
        (status = 404, description = "奖励不存在")
    )
)]
pub async fn update_reward(
    reward_service: web::Data<RewardService>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
    request: web::Json<UpdateRewardRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Admin) {
        return Ok(e.error_response());
    }
    match reward_service
        .update(path.into_inner(), request.into_inner(), &auth)
        .await
    {
        Ok(reward) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": reward,
            "message": "Reward updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/rewards/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "奖励 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "奖励删除成功"),
        (status = 403, description = "需要管理员角色"),
        (status = 404, description = "奖励不存在")
    )
)]
pub async fn delete_reward(
    reward_service: web::Data<RewardService>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Admin) {
        return Ok(e.error_response());
    }
    match reward_service.delete(path.into_inner(), &auth).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Reward deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/analytics",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取平台总览成功", body = AdminAnalyticsResponse),
        (status = 403, description = "需要管理员角色")
    )
)]
pub async fn get_analytics(
    analytics_service: web::Data<AnalyticsService>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Admin) {
        return Ok(e.error_response());
    }
    match analytics_service.admin_overview().await {
        Ok(overview) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": overview
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/addreward", web::post().to(add_reward))
            .route("/addpartner", web::post().to(add_partner))
            .route("/getpartners", web::get().to(get_partners))
            .route("/analytics", web::get().to(get_analytics))
            .route("/rewards/{id}", web::put().to(update_reward))
            .route("/rewards/{id}", web::delete().to(delete_reward)),
    );
}
