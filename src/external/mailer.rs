use crate::config::MailConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
}

/// 通过 HTTP 邮件服务发送 OTP 验证码。
/// 未配置 api_key 时降级为仅打日志 (本地开发与测试环境)。
#[derive(Clone)]
pub struct EmailService {
    client: Client,
    config: MailConfig,
}

impl EmailService {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub async fn send_otp_email(&self, to: &str, otp: &str) -> AppResult<()> {
        if self.config.api_key.is_empty() {
            log::info!("Mail delivery disabled, skipping OTP email to {to}");
            return Ok(());
        }

        let body = SendMailRequest {
            from: &self.config.from_address,
            to,
            subject: "Your RewardX verification code",
            text: format!(
                "{otp} is your RewardX verification code. Please do not share it with anyone.\n\
                 It will expire in 5 minutes.\nTeam RewardX"
            ),
        };

        let response = self
            .client
            .post(format!("{}/messages", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to send OTP email: {e}")))?;

        if response.status().is_success() {
            log::info!("OTP email sent successfully: {to}");
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("OTP email failed to send: {to}, Error: {error_text}");
            Err(AppError::InternalError(format!(
                "Email sending failed: {error_text}"
            )))
        }
    }
}
