// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{
        ChangePasswordPayload, Claims, LoginPayload, RegisterPayload, UpdateProfilePayload, User,
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    jwt_expire_hours: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, jwt_expire_hours: i64) -> Self {
        Self { user_repo, jwt_secret, jwt_expire_hours }
    }

    // Bcrypt é pesado: roda em thread separada para não travar o runtime.
    async fn hash_password(password: String) -> Result<String, AppError> {
        let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
        let valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
        Ok(valid)
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<(String, User), AppError> {
        let user = self
            .user_repo
            .find_by_username(&payload.username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if user.status != 1 {
            return Err(AppError::AccountDisabled);
        }

        let is_valid =
            Self::verify_password(payload.password.clone(), user.password_hash.clone()).await?;
        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok((token, user))
    }

    // Registro público sempre entra como "operator"; só o seed cria admin.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<User, AppError> {
        if self.user_repo.find_by_username(&payload.username).await?.is_some() {
            return Err(AppError::UsernameTaken);
        }

        let hashed = Self::hash_password(payload.password.clone()).await?;
        let user = self
            .user_repo
            .create(&payload.username, &payload.email, &hashed, &payload.real_name, "operator")
            .await?;
        Ok(user)
    }

    pub async fn profile(&self, user_id: i64) -> Result<User, AppError> {
        self.user_repo.find_by_id(user_id).await?.ok_or(AppError::UserNotFound)
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        payload: &UpdateProfilePayload,
    ) -> Result<User, AppError> {
        self.user_repo
            .update_profile(
                user_id,
                &payload.email,
                &payload.real_name,
                &payload.phone,
                payload.avatar.as_deref(),
            )
            .await
    }

    pub async fn change_password(
        &self,
        user: &User,
        payload: &ChangePasswordPayload,
    ) -> Result<(), AppError> {
        let matches =
            Self::verify_password(payload.old_password.clone(), user.password_hash.clone()).await?;
        if !matches {
            return Err(AppError::OldPasswordMismatch);
        }

        let hashed = Self::hash_password(payload.new_password.clone()).await?;
        self.user_repo.update_password(user.meta.id, &hashed).await
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.meta.id,
            username: user.username.clone(),
            role: user.role.clone(),
            iat: now.timestamp() as usize,
            exp: (now + chrono::Duration::hours(self.jwt_expire_hours)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?;
        Ok(token)
    }

    // Decodifica o token e carrega o usuário VIVO do banco: conta
    // removida ou desativada fica fora mesmo com token ainda válido.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if user.status != 1 {
            return Err(AppError::AccountDisabled);
        }
        Ok(user)
    }

    // Garante a conta de administrador na primeira subida.
    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Ok(());
        }

        let hashed = Self::hash_password(password.to_owned()).await?;
        self.user_repo
            .create(username, "", &hashed, "Administrador", "admin")
            .await?;
        tracing::info!("👑 Conta de administrador '{}' criada.", username);
        Ok(())
    }
}
