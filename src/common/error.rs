use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::models::access::Screen;

// Falhas de consulta (NotFound, ProfileLookup, DatabaseError) e falhas de
// validação (ValidationError, InsufficientStock) são as duas famílias.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("Quantidade insuficiente em estoque. Disponível: {available} {unit}")]
    InsufficientStock { available: Decimal, unit: String },

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("SKU já cadastrado")]
    SkuAlreadyExists,

    #[error("Já existe um perfil de acesso com o nome '{0}'")]
    RoleNameAlreadyExists(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Perfil do usuário {0} não encontrado")]
    ProfileLookup(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Sem acesso à tela '{screen}'")]
    ScreenForbidden { screen: Screen, redirect_to: Screen },

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Erro de validação de um único campo, no mesmo formato do `validator`.
    pub fn field(field: &'static str, code: &'static str, message: &str) -> Self {
        let mut err = ValidationError::new(code);
        err.message = Some(message.to_string().into());
        let mut errors = ValidationErrors::new();
        errors.add(field, err);
        AppError::ValidationError(errors)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists
            | AppError::SkuAlreadyExists
            | AppError::RoleNameAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound | AppError::ProfileLookup(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ScreenForbidden { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                })
            }
            AppError::InsufficientStock { available, unit } => json!({
                "error": self.to_string(),
                "available": available,
                "unit": unit,
            }),
            AppError::ScreenForbidden { screen, redirect_to } => json!({
                "error": self.to_string(),
                "screen": screen,
                "redirectTo": redirect_to,
            }),
            AppError::EmailAlreadyExists => json!({ "error": "Este e-mail já está em uso." }),
            AppError::InvalidCredentials => json!({ "error": "E-mail ou senha inválidos." }),
            AppError::InvalidToken => json!({ "error": "Token de autenticação inválido ou ausente." }),
            AppError::SkuAlreadyExists
            | AppError::RoleNameAlreadyExists(_)
            | AppError::UserNotFound
            | AppError::ProfileLookup(_)
            | AppError::NotFound(_) => json!({ "error": self.to_string() }),

            // Todo o resto vira 500; o detalhe só vai para o log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                json!({ "error": "Ocorreu um erro inesperado." })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_family_maps_to_bad_request() {
        let err = AppError::field("quantity", "required", "Informe a quantidade.");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::InsufficientStock { available: Decimal::from(3), unit: "un".into() };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Quantidade insuficiente em estoque. Disponível: 3 un");
    }

    #[test]
    fn lookup_family_maps_to_not_found() {
        assert_eq!(AppError::NotFound("Produto não encontrado.").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ProfileLookup("x".into()).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_report_font_is_a_server_error() {
        let err = AppError::FontNotFound("./fonts".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn forbidden_screen_carries_redirect() {
        let err = AppError::ScreenForbidden { screen: Screen::Reports, redirect_to: Screen::Dashboard };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Sem acesso à tela 'reports'");
    }
}
