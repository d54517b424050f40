use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        cookie::{clear_cookie, session_cookie, AUTH_COOKIE},
        dto::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest},
        jwt::{JwtKeys, VerifyError},
        password::{hash_password, verify_password},
        repo_types::User,
    },
    error::AuthError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/profile", get(profile))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    payload.validate()?;

    // Pre-check for the common case; the unique index still decides races.
    let existing = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_email failed");
            AuthError::from(e).for_register()
        })?;
    if existing.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AuthError::Conflict);
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        AuthError::from(e).for_register()
    })?;

    let user = User::create(&state.db, &payload.name, &payload.email, &hash)
        .await
        .map_err(|e| {
            error!(error = %e, "create user failed");
            AuthError::from(e).for_register()
        })?
        // lost the race against a concurrent register with the same email
        .ok_or(AuthError::Conflict)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "user created".into(),
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AuthError> {
    payload.validate()?;

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            // same message as a wrong password, no account enumeration
            warn!(email = %payload.email, "login unknown email");
            return Err(AuthError::invalid_credentials());
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(e.into());
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, user_id = %user.id, "verify_password failed");
        AuthError::from(e)
    })?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(AuthError::invalid_credentials());
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.role).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        AuthError::from(e)
    })?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    let jar = jar.add(session_cookie(
        token,
        state.config.jwt.ttl_days,
        state.config.production,
    ));
    Ok((
        jar,
        Json(AuthResponse {
            message: "login successful".into(),
            user: user.into(),
        }),
    ))
}

/// Clears the session cookie unconditionally; no token validation, no
/// server-side state to drop.
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(clear_cookie(state.config.production));
    (
        jar,
        Json(MessageResponse {
            message: "logged out".into(),
        }),
    )
}

#[instrument(skip(state, jar))]
pub async fn profile(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<AuthResponse>, AuthError> {
    let token = jar
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(AuthError::unauthorized)?;

    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify(&token).map_err(|e| match e {
        VerifyError::Malformed => AuthError::MalformedToken,
        VerifyError::Invalid => {
            warn!("invalid or expired token");
            AuthError::unauthorized()
        }
    })?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %claims.sub, "find_by_id failed");
            AuthError::from(e)
        })?
        .ok_or(AuthError::NotFound)?;

    Ok(Json(AuthResponse {
        message: "profile retrieved".into(),
        user: user.into(),
    }))
}
