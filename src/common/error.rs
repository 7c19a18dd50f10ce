// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Conta desativada")]
    AccountDisabled,

    #[error("Acesso restrito a administradores")]
    AdminOnly,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Categoria não encontrada")]
    CategoryNotFound,

    #[error("Fornecedor não encontrado")]
    SupplierNotFound,

    #[error("Nome de usuário já existe")]
    UsernameTaken,

    #[error("SKU '{0}' já existe")]
    SkuTaken(String),

    #[error("Código de fornecedor '{0}' já existe")]
    SupplierCodeTaken(String),

    // Guardas de integridade referencial do soft-delete.
    #[error("A categoria tem {0} produto(s) vinculado(s)")]
    CategoryInUse(i64),

    #[error("O fornecedor tem {0} produto(s) vinculado(s)")]
    SupplierInUse(i64),

    // A única guarda dura do motor de estoque: saída maior que o saldo.
    #[error("Estoque insuficiente: atual {current}, solicitado {requested}")]
    InsufficientStock { current: i64, requested: i64 },

    #[error("Senha atual incorreta")]
    OldPasswordMismatch,

    // Variante para erros de banco de dados. Qualquer falha no commit
    // atômico aborta a transação inteira e cai aqui.
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::AccountDisabled => {
                (StatusCode::FORBIDDEN, "Esta conta está desativada.".to_string())
            }
            AppError::AdminOnly => (
                StatusCode::FORBIDDEN,
                "Apenas administradores podem executar esta operação.".to_string(),
            ),

            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::ProductNotFound => {
                (StatusCode::NOT_FOUND, "Produto não encontrado.".to_string())
            }
            AppError::CategoryNotFound => {
                (StatusCode::NOT_FOUND, "Categoria não encontrada.".to_string())
            }
            AppError::SupplierNotFound => {
                (StatusCode::NOT_FOUND, "Fornecedor não encontrado.".to_string())
            }

            AppError::UsernameTaken => {
                (StatusCode::CONFLICT, "Este nome de usuário já está em uso.".to_string())
            }
            AppError::SkuTaken(sku) => {
                (StatusCode::CONFLICT, format!("O SKU '{}' já está em uso.", sku))
            }
            AppError::SupplierCodeTaken(code) => {
                (StatusCode::CONFLICT, format!("O código '{}' já está em uso.", code))
            }
            AppError::CategoryInUse(count) => (
                StatusCode::CONFLICT,
                format!("A categoria tem {} produto(s) vinculado(s) e não pode ser excluída.", count),
            ),
            AppError::SupplierInUse(count) => (
                StatusCode::CONFLICT,
                format!("O fornecedor tem {} produto(s) vinculado(s) e não pode ser excluído.", count),
            ),
            AppError::InsufficientStock { current, requested } => (
                StatusCode::CONFLICT,
                format!("Estoque insuficiente. Saldo atual: {}, saída solicitada: {}.", current, requested),
            ),

            AppError::OldPasswordMismatch => {
                (StatusCode::BAD_REQUEST, "A senha atual está incorreta.".to_string())
            }

            // Todos os outros erros (DatabaseError, InternalServerError...)
            // viram 500. O `tracing` loga a mensagem detalhada.
            ref e => {
                tracing::error!("🔥 Erro interno do servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
