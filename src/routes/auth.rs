use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    Form, Json,
};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::SESSION_COOKIE;
use crate::db;
use crate::error::{AppError, Result};
use crate::security::{issue_session_token, verify_password, verify_session_token};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
}

/// Authenticated user attached to the request by [`require_session`]
#[derive(Debug, Clone, Copy)]
pub struct SessionUser(pub Uuid);

/// Sign in with email and password
///
/// Unknown emails and wrong passwords get the same 401 response.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, AppError>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let email = form.email.trim();
    // Postgres text cannot hold NUL, so no stored email can match
    if email.contains('\0') {
        return Err(AppError::InvalidCredentials);
    }

    let user = match db::get_user(&state.pool, email).await {
        Ok(user) => user,
        Err(AppError::UserNotFound) => {
            tracing::info!("Login attempt for unknown email");
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    if !verify_password(&form.password, &user.password) {
        tracing::info!("Login attempt with wrong password for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    let expires_at = Utc::now().timestamp() + state.config.session_ttl_secs;
    let token = issue_session_token(user.id, expires_at, &state.config.session_secret)?;
    let cookie = session_cookie(
        token.clone(),
        state.config.session_ttl_secs,
        state.config.environment == "production",
    );

    tracing::info!("User {} signed in", user.id);

    Ok((jar.add(cookie), Json(LoginResponse { token, expires_at })))
}

/// Sign out by expiring the session cookie
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    let mut cookie = session_cookie(String::new(), 0, state.config.environment == "production");
    cookie.make_removal();

    (jar.add(cookie), Json(serde_json::json!({ "success": true })))
}

/// Reject requests without a valid session token
///
/// The token is read from `Authorization: Bearer …` or the session cookie.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = session_token(request.headers(), &jar).ok_or(AppError::Unauthorized)?;

    let user_id = verify_session_token(
        &token,
        &state.config.session_secret,
        Utc::now().timestamp(),
    )
    .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(SessionUser(user_id));
    Ok(next.run(request).await)
}

/// Extract the session token, preferring the bearer header over the cookie
pub fn session_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string());
    if bearer.is_some() {
        return bearer;
    }

    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value_trimmed().to_string())
        .filter(|value| !value.is_empty())
}

fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .secure(secure)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn cookie_headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_wins() {
        let mut headers = cookie_headers("session=xyz");
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(session_token(&headers, &jar).as_deref(), Some("abc"));
    }

    #[test]
    fn test_cookie_token() {
        let headers = cookie_headers("theme=dark; session=xyz; other=1");
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(session_token(&headers, &jar).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_quoted_cookie_token() {
        let headers = cookie_headers("session=\"xyz\"");
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(session_token(&headers, &jar).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_missing_or_empty_token() {
        let headers = HeaderMap::new();
        assert_eq!(session_token(&headers, &CookieJar::from_headers(&headers)), None);

        let headers = cookie_headers("session=");
        assert_eq!(session_token(&headers, &CookieJar::from_headers(&headers)), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok".to_string(), 60, true);

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));
        assert_eq!(cookie.secure(), Some(true));

        let cleared = session_cookie(String::new(), 0, false);
        assert_eq!(cleared.secure(), Some(false));
    }
}
