// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::EntityMeta;

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub meta: EntityMeta,

    pub username: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub real_name: String,
    pub phone: String,
    pub role: String,   // "admin" ou "operator"
    pub status: i64,    // 1 = ativo, 0 = desativado
    pub avatar: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "O nome de usuário é obrigatório."))]
    pub username: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Dados para registro de um novo usuário (sempre entra como "operator")
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 3, max = 50, message = "O nome de usuário deve ter entre 3 e 50 caracteres."))]
    pub username: String,
    #[validate(length(min = 6, max = 100, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub real_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub phone: String,
    // Avatar é opcional: ausente mantém o atual.
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
    #[validate(length(min = 1, message = "A senha atual é obrigatória."))]
    pub old_password: String,
    #[validate(length(min = 6, max = 100, message = "A nova senha deve ter no mínimo 6 caracteres."))]
    pub new_password: String,
}

// Resposta de autenticação com o token e o usuário logado
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,         // ID do usuário
    pub username: String,
    pub role: String,
    pub exp: usize,       // Expiration time
    pub iat: usize,       // Issued At
}
