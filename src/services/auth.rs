// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User},
};

// Assina e valida os tokens de sessão
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: String, algorithm: Algorithm, ttl: Duration) -> Self {
        Self { secret, algorithm, ttl }
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalServerError(anyhow::anyhow!("validade do token fora do intervalo")))?;
        let claims = Claims {
            sub: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    /// Malformado, assinatura errada ou expirado: tudo vira `InvalidToken`.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, tokens: TokenIssuer) -> Self {
        Self { user_repo, tokens }
    }

    /// E-mail desconhecido e senha errada produzem o mesmo erro.
    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.senha_hash.clone();

        // Hash malformado ou legado conta como senha errada
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone).unwrap_or(false)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?;

        if !is_password_valid {
            tracing::info!("tentativa de login recusada");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "login efetuado");
        self.tokens.issue(&user)
    }

    /// Resolve o token para um usuário ainda existente.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.decode(token)?;

        self.user_repo
            .find_by_email(&claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;

    fn user() -> User {
        User {
            id: 3,
            email: "corretor@crm.com".into(),
            senha_hash: String::new(),
            role: Role::Vendedor,
            created_at: Utc::now(),
        }
    }

    fn issuer(ttl_minutes: i64) -> TokenIssuer {
        TokenIssuer::new("segredo-de-teste".into(), Algorithm::HS256, Duration::minutes(ttl_minutes))
    }

    #[test]
    fn token_carries_subject_and_role() {
        let tokens = issuer(60);
        let token = tokens.issue(&user()).unwrap();
        let claims = tokens.decode(&token).unwrap();

        assert_eq!(claims.sub, "corretor@crm.com");
        assert_eq!(claims.role, Role::Vendedor);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = issuer(-5);
        let token = tokens.issue(&user()).unwrap();
        assert!(matches!(tokens.decode(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenIssuer::new("outro".into(), Algorithm::HS256, Duration::minutes(60));
        let token = other.issue(&user()).unwrap();
        assert!(matches!(issuer(60).decode(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(issuer(60).decode("nao.e.jwt"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn malformed_digest_is_a_mismatch() {
        assert!(!verify("admin123", "$legacy$sha256_crypt").unwrap_or(false));
    }
}
