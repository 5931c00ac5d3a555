use crate::middlewares::AuthenticatedUser;
use crate::models::*;
use crate::services::{AnalyticsService, RewardService};
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/partner/addreward",
    tag = "partner",
    request_body = CreateRewardRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "奖励创建成功", body = RewardResponse),
        (status = 403, description = "需要商家角色"),
        (status = 409, description = "奖励名称已存在")
    )
)]
pub async fn add_reward(
    reward_service: web::Data<RewardService>,
    auth: AuthenticatedUser,
    request: web::Json<CreateRewardRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Partner) {
        return Ok(e.error_response());
    }
    match reward_service.create(request.into_inner(), auth.id).await {
        Ok(reward) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": reward,
            "message": "Partner reward added"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/partner/rewards",
    tag = "partner",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取自有奖励成功", body = [RewardResponse]),
        (status = 403, description = "需要商家角色")
    )
)]
pub async fn get_rewards(
    reward_service: web::Data<RewardService>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Partner) {
        return Ok(e.error_response());
    }
    match reward_service.list_by_owner(auth.id).await {
        Ok(rewards) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rewards
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/partner/rewards/{id}",
    tag = "partner",
    request_body = UpdateRewardRequest,
    params(("id" = i64, Path, description = "奖励 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "奖励更新成功", body = RewardResponse),
        (status = 403, description = "不是该奖励的创建者"),
        (status = 404, description = "奖励不存在")
    )
)]
pub async fn update_reward(
    reward_service: web::Data<RewardService>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
    request: web::Json<UpdateRewardRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Partner) {
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
    path = "/partner/rewards/{id}",
    tag = "partner",
    params(("id" = i64, Path, description = "奖励 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "奖励删除成功"),
        (status = 403, description = "不是该奖励的创建者"),
        (status = 404, description = "奖励不存在")
    )
)]
pub async fn delete_reward(
    reward_service: web::Data<RewardService>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Partner) {
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
    path = "/partner/analytics",
    tag = "partner",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取商家总览成功", body = PartnerAnalyticsResponse),
        (status = 403, description = "需要商家角色")
    )
)]
pub async fn get_analytics(
    analytics_service: web::Data<AnalyticsService>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse> {
    if let Err(e) = auth.require_role(Role::Partner) {
        return Ok(e.error_response());
    }
    match analytics_service.partner_overview(auth.id).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": overview
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn partner_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/partner")
            .route("/addreward", web::post().to(add_reward))
            .route("/rewards", web::get().to(get_rewards))
            .route("/analytics", web::get().to(get_analytics))
            .route("/rewards/{id}", web::put().to(update_reward))
            .route("/rewards/{id}", web::delete().to(delete_reward)),
    );
}
