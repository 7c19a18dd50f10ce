// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{
        AuthResponse, ChangePasswordPayload, LoginPayload, RegisterPayload, UpdateProfilePayload,
        User,
    },
};

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login bem-sucedido", body = AuthResponse),
        (status = 401, description = "Usuário ou senha inválidos"),
        (status = 403, description = "Conta desativada")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let (token, user) = app_state.auth_service.login(&payload).await?;
    Ok(Json(AuthResponse { token, user }))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 409, description = "Nome de usuário já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let user = app_state.auth_service.register(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/profile",
    tag = "Auth",
    responses((status = 200, description = "Dados do usuário logado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn get_profile(user: AuthenticatedUser) -> impl IntoResponse {
    // O middleware já carregou o usuário vivo do banco.
    Json(user.0)
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/profile",
    tag = "Auth",
    request_body = UpdateProfilePayload,
    responses((status = 200, description = "Perfil atualizado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let updated = app_state.auth_service.update_profile(user.0.meta.id, &payload).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Auth",
    request_body = ChangePasswordPayload,
    responses(
        (status = 204, description = "Senha alterada"),
        (status = 400, description = "Senha atual incorreta")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_password(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    app_state.auth_service.change_password(&user.0, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
