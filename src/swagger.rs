use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::verify_otp,
        handlers::auth::login,
        handlers::rewards::list_rewards,
        handlers::user::get_profile,
        handlers::user::get_wallet,
        handlers::user::redeem,
        handlers::user::get_transactions,
        handlers::admin::add_reward,
        handlers::admin::add_partner,
        handlers::admin::get_partners,
        handlers::admin::update_reward,
        handlers::admin::delete_reward,
        handlers::admin::get_analytics,
        handlers::partner::add_reward,
        handlers::partner::get_rewards,
        handlers::partner::update_reward,
        handlers::partner::delete_reward,
        handlers::partner::get_analytics,
    ),
    components(
        schemas(
            Role,
            RegisterRequest,
            VerifyOtpRequest,
            LoginRequest,
            LoginResponse,
            CreatePartnerRequest,
            UserResponse,
            WalletResponse,
            CreateRewardRequest,
            UpdateRewardRequest,
            RewardResponse,
            TransactionStatus,
            RedeemRequest,
            TransactionResponse,
            AdminAnalyticsResponse,
            ActivePartner,
            PartnerAnalyticsResponse,
            PopularReward,
            PaginationParams,
            ApiError,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, OTP verification and login"),
        (name = "rewards", description = "Public reward catalog"),
        (name = "user", description = "Profile, wallet and redemption"),
        (name = "admin", description = "Platform administration"),
        (name = "partner", description = "Partner catalog management"),
    ),
    info(
        title = "RewardX Backend API",
        version = "1.0.0",
        description = "Loyalty rewards REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
