use std::future::Future;

use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::models::UserIdentity;
use crate::services::AuthService;
use crate::state::AppState;

/// `Json` whose rejections render as `{"detail": ...}` like every other error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct AppForm<T>(pub T);

/// `Multipart` whose rejections (wrong content type, missing boundary) render as `{"detail": ...}`.
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Ok(Self(multipart))
    }
}

/// The caller behind `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserIdentity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    // Pull what we need out of `parts` synchronously so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|v| v.to_str().map(str::to_owned));
        let service = AuthService::new(state.db.clone(), state.config.clone());

        async move {
            let header = match header {
                Some(Ok(value)) => value,
                Some(Err(_)) | None => {
                    return Err(AppError::unauthorized("Authorization header is required"));
                }
            };
            let token = bearer_token(&header).ok_or_else(|| {
                AppError::unauthorized("Authorization header format must be Bearer {token}")
            })?;
            let identity = service.authenticate(token).await?;
            Ok(Self(identity))
        }
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() && !token.contains(' '))
        .then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bearer_header() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer a b"), None);
    }
}
