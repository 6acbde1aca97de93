//! 统一错误类型定义
//!
//! relay 与 console 共享同一个错误类型，HTTP 响应体统一为
//! `{ "ok": false, "error": "..." }`。

use thiserror::Error;

/// 500 响应对外暴露的通用消息，不泄露内部细节
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Erro ao falar com o serviço externo";

#[derive(Error, Debug)]
pub enum CertidaoError {
    /// 请求体缺少 certidao (400)
    #[error("Payload sem certidao")]
    MissingPayload,

    /// 不支持的 HTTP 方法 (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// 与外部服务通信失败 (500)
    #[error("falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    /// 外部服务返回非 2xx 状态
    #[error("status HTTP inesperado: {0}")]
    UpstreamStatus(u16),

    /// 外部服务返回 ok: false
    #[error("operação recusada: {0}")]
    Rejected(String),

    /// 序列化错误 (500)
    #[error("erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 其他内部错误 (500)
    #[error("erro interno: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CertidaoError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// 判断是否为客户端错误（4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingPayload | Self::MethodNotAllowed)
    }

    /// 判断是否为服务端错误（5xx）
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    /// 获取 HTTP 状态码
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingPayload => 400,
            Self::MethodNotAllowed => 405,
            _ => 500,
        }
    }

    /// 对外返回的错误消息
    pub fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            UPSTREAM_FAILURE_MESSAGE.to_string()
        }
    }

    #[cfg(feature = "server")]
    pub fn axum_status_code(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::from_u16(self.http_status_code())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}

pub type Result<T> = std::result::Result<T, CertidaoError>;

// ============ Axum HTTP 响应支持 ============

#[cfg(feature = "server")]
mod axum_impl {
    use super::*;
    use axum::{
        Json,
        response::{IntoResponse, Response},
    };
    use serde_json::json;

    impl IntoResponse for CertidaoError {
        fn into_response(self) -> Response {
            let status = self.axum_status_code();

            match &self {
                CertidaoError::MissingPayload => {
                    tracing::info!(status = status.as_u16(), "Request without certidao payload");
                }
                CertidaoError::MethodNotAllowed => {
                    tracing::info!(status = status.as_u16(), "Method not allowed");
                }
                CertidaoError::Transport(err) => {
                    tracing::error!(
                        status = status.as_u16(),
                        transport_error = %err,
                        "Upstream request failed"
                    );
                }
                CertidaoError::UpstreamStatus(code) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        upstream_status = *code,
                        "Upstream returned unexpected status"
                    );
                }
                CertidaoError::Rejected(reason) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        reason = %reason,
                        "Upstream rejected the operation"
                    );
                }
                CertidaoError::Serialization(err) => {
                    tracing::error!(
                        status = status.as_u16(),
                        serialization_error = %err,
                        "JSON serialization failed"
                    );
                }
                CertidaoError::Internal(err) => {
                    tracing::error!(
                        status = status.as_u16(),
                        internal_error = ?err,
                        "Internal server error"
                    );
                }
            }

            let body = Json(json!({"ok": false, "error": self.public_message()}));
            (status, body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(CertidaoError::MissingPayload.http_status_code(), 400);
        assert_eq!(CertidaoError::MethodNotAllowed.http_status_code(), 405);
        assert_eq!(CertidaoError::UpstreamStatus(502).http_status_code(), 500);
        assert_eq!(CertidaoError::rejected("x").http_status_code(), 500);
    }

    #[test]
    fn test_client_error_messages_are_public() {
        assert_eq!(
            CertidaoError::MissingPayload.public_message(),
            "Payload sem certidao"
        );
        assert_eq!(
            CertidaoError::MethodNotAllowed.public_message(),
            "Method not allowed"
        );
    }

    #[test]
    fn test_server_error_messages_are_generic() {
        let err: CertidaoError = anyhow::anyhow!("dns lookup failed for internal-host").into();
        assert!(err.is_server_error());
        assert_eq!(err.public_message(), UPSTREAM_FAILURE_MESSAGE);
        assert!(err.to_string().contains("internal-host"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CertidaoError = json_err.into();
        assert!(matches!(err, CertidaoError::Serialization(_)));
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_into_response_body_shape() {
        use axum::body::to_bytes;
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let response = CertidaoError::MissingPayload.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "Payload sem certidao");
    }
}
