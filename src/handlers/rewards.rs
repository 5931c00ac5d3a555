use crate::models::RewardResponse;
use crate::services::RewardService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/rewards",
    tag = "rewards",
    responses(
        (status = 200, description = "获取奖励目录成功", body = [RewardResponse]),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn list_rewards(reward_service: web::Data<RewardService>) -> Result<HttpResponse> {
    match reward_service.list_all().await {
        Ok(rewards) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rewards
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn rewards_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/rewards", web::get().to(list_rewards));
}
