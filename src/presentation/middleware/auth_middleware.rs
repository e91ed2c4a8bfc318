// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::AuthSettings;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// 无需认证的路径
const PUBLIC_PATHS: [&str; 3] = ["/health", "/v1/version", "/api/scrape/webhook"];

/// JWT 载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户ID
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iss: Option<String>,
}

/// 已认证的用户，由中间件写入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl AuthState {
    pub fn new(settings: &AuthSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &settings.issuer {
            validation.set_issuer(&[issuer]);
        }
        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(settings.jwt_secret.as_bytes())),
            validation: Arc::new(validation),
        }
    }

    /// 校验令牌并取出用户ID
    pub fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            AppError::Unauthorized
        })?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| {
            warn!("Token subject is not a user id: {}", data.claims.sub);
            AppError::Unauthorized
        })
    }
}

/// 认证中间件
///
/// 校验 `Authorization: Bearer <jwt>`，并把用户ID写入请求扩展
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    debug!("AuthMiddleware processing path: {}", path);
    if PUBLIC_PATHS.contains(&path) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let user_id = state.verify(token)?;
    req.extensions_mut().insert(AuthenticatedUser { user_id });
    Ok(next.run(req).await)
}
