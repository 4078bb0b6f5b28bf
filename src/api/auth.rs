use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::api::validation::validate_payload;
use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::User;
use crate::repositories;
use crate::schemas::auth::{
    IdpLoginRequest, IdpRegisterRequest, LoginRequest, MessageResponse, RegisterRequest,
    RegisteredResponse, TokenResponse,
};
use crate::schemas::user::UserResponse;
use crate::services::identity::{IdentityError, IdentityService, ProviderIdentity};

/// Max attempts per window for auth endpoints (login/register/idp).
const AUTH_RATE_LIMIT: u64 = 10;
/// Rate limit window in seconds.
const AUTH_RATE_WINDOW_SECONDS: u64 = 60;

const PENDING_VERIFICATION: &str =
    "Your account is pending verification by the administrator. Please wait for approval.";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/idp/login", post(idp_login))
        .route("/idp/register", post(idp_register))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredResponse>), ApiError> {
    validate_payload(&payload)?;

    let rate_key = format!("rl:register:{}", payload.username);
    let allowed = state
        .redis()
        .rate_limit(&rate_key, AUTH_RATE_LIMIT, AUTH_RATE_WINDOW_SECONDS)
        .await
        .unwrap_or(true);
    if !allowed {
        return Err(ApiError::TooManyRequests("Too many registration attempts, try again later"));
    }

    let username = payload.username.trim();
    let existing = repositories::users::exists_by_username(state.db(), username)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing username"))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("This username is already registered".to_string()));
    }

    let student_id = payload.student_id.trim();
    let existing = repositories::student_profiles::exists_by_student_id(state.db(), student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing registration number"))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("This Registration No is already registered".to_string()));
    }

    let email = normalize_email(payload.email.as_deref());
    if let Some(email) = email.as_deref() {
        let existing = repositories::users::exists_by_email(state.db(), email)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check existing email"))?;
        if existing.is_some() {
            return Err(ApiError::Conflict("This email is already registered".to_string()));
        }
    }

    let batch = repositories::batches::find_by_id(state.db(), payload.batch_id.trim())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load batch"))?;
    let Some(batch) = batch.filter(|batch| batch.is_active) else {
        return Err(ApiError::BadRequest("Unknown or inactive batch".to_string()));
    };

    let hashed_password = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let now = primitive_now_utc();
    let full_name = format!("{} {}", payload.first_name.trim(), payload.last_name.trim());

    let user = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            username,
            email: email.as_deref(),
            hashed_password: Some(hashed_password),
            full_name: &full_name,
            is_staff: false,
            is_active: true,
            idp_subject: None,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create user"))?;

    repositories::student_profiles::create(
        state.db(),
        repositories::student_profiles::CreateProfile {
            id: &Uuid::new_v4().to_string(),
            user_id: &user.id,
            student_id,
            phone: payload.phone.trim(),
            batch_id: Some(&batch.id),
            date_of_birth: payload.date_of_birth,
            address: payload.address.as_deref().unwrap_or(""),
            profile_picture_key: None,
            enrollment_date: OffsetDateTime::now_utc().date(),
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create student profile"))?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            detail: "Registration successful! Your account is pending verification by the \
                     administrator. You will be able to login once your account is approved."
                .to_string(),
            user: UserResponse::from_db(user),
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let rate_key = format!("rl:login:{}", payload.username);
    let allowed = state
        .redis()
        .rate_limit(&rate_key, AUTH_RATE_LIMIT, AUTH_RATE_WINDOW_SECONDS)
        .await
        .unwrap_or(true);
    if !allowed {
        return Err(ApiError::TooManyRequests("Too many login attempts, try again later"));
    }

    let user = repositories::users::find_by_username(state.db(), payload.username.trim())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?
        .ok_or(ApiError::Unauthorized("Incorrect username or password"))?;

    let verified =
        security::verify_optional_password(&payload.password, user.hashed_password.as_deref())
            .map_err(|_| ApiError::Unauthorized("Incorrect username or password"))?;
    if !verified {
        return Err(ApiError::Unauthorized("Incorrect username or password"));
    }

    issue_session(&state, user).await
}

async fn logout() -> Json<MessageResponse> {
    // Bearer tokens are stateless; the client discards its copy.
    Json(MessageResponse { detail: "You have been logged out successfully.".to_string() })
}

async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from_db(user))
}

async fn idp_login(
    State(state): State<AppState>,
    Json(payload): Json<IdpLoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let identity = verify_provider_token(&state, &payload.id_token).await?;

    let user = repositories::users::find_by_idp_subject(state.db(), &identity.subject)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user by identity subject"))?
        .ok_or_else(|| {
            ApiError::NotFound("No account for this identity; complete registration".to_string())
        })?;

    issue_session(&state, user).await
}

async fn idp_register(
    State(state): State<AppState>,
    Json(payload): Json<IdpRegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredResponse>), ApiError> {
    validate_payload(&payload)?;

    let identity = verify_provider_token(&state, &payload.id_token).await?;

    let rate_key = format!("rl:idp-register:{}", identity.subject);
    let allowed = state
        .redis()
        .rate_limit(&rate_key, AUTH_RATE_LIMIT, AUTH_RATE_WINDOW_SECONDS)
        .await
        .unwrap_or(true);
    if !allowed {
        return Err(ApiError::TooManyRequests("Too many registration attempts, try again later"));
    }

    let existing = repositories::users::find_by_idp_subject(state.db(), &identity.subject)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing identity"))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("This identity is already registered".to_string()));
    }

    let student_id = payload.student_id.trim();
    let existing =
        repositories::student_profiles::exists_by_student_id(state.db(), student_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check existing registration number"))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("This Registration No is already registered".to_string()));
    }

    let username = identity.email.clone().unwrap_or_else(|| identity.subject.clone());
    let existing = repositories::users::exists_by_username(state.db(), &username)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing username"))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("This username is already registered".to_string()));
    }

    let email = normalize_email(identity.email.as_deref());
    if let Some(email) = email.as_deref() {
        let existing = repositories::users::exists_by_email(state.db(), email)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check existing email"))?;
        if existing.is_some() {
            return Err(ApiError::Conflict("This email is already registered".to_string()));
        }
    }

    let batch = repositories::batches::find_by_id(state.db(), payload.batch_id.trim())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load batch"))?;
    let Some(batch) = batch.filter(|batch| batch.is_active) else {
        return Err(ApiError::BadRequest("Unknown or inactive batch".to_string()));
    };

    let now = primitive_now_utc();

    let user = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            username: &username,
            email: email.as_deref(),
            hashed_password: None,
            full_name: payload.full_name.trim(),
            is_staff: false,
            is_active: true,
            idp_subject: Some(&identity.subject),
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create user"))?;

    repositories::student_profiles::create(
        state.db(),
        repositories::student_profiles::CreateProfile {
            id: &Uuid::new_v4().to_string(),
            user_id: &user.id,
            student_id,
            phone: payload.phone.trim(),
            batch_id: Some(&batch.id),
            date_of_birth: None,
            address: "",
            profile_picture_key: None,
            enrollment_date: OffsetDateTime::now_utc().date(),
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create student profile"))?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            detail: "Registration successful! Your account is pending verification by the \
                     administrator."
                .to_string(),
            user: UserResponse::from_db(user),
        }),
    ))
}

/// Shared tail of every login path: active check, verification gate for
/// student accounts, then the bearer token.
async fn issue_session(state: &AppState, user: User) -> Result<Json<TokenResponse>, ApiError> {
    if !user.is_active {
        return Err(ApiError::BadRequest("Inactive user".to_string()));
    }

    if !user.is_staff {
        let profile = repositories::student_profiles::find_by_user_id(state.db(), &user.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load student profile"))?;

        let Some(profile) = profile else {
            return Err(ApiError::Forbidden("This account is not a student account"));
        };

        if !profile.is_verified {
            return Err(ApiError::Forbidden(PENDING_VERIFICATION));
        }
    }

    let token = security::create_access_token(&user.id, state.settings(), None)
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        user: UserResponse::from_db(user),
    }))
}

async fn verify_provider_token(
    state: &AppState,
    id_token: &str,
) -> Result<ProviderIdentity, ApiError> {
    let service = IdentityService::from_settings(state.settings())
        .map_err(|e| ApiError::internal(e, "Failed to build identity provider client"))?;

    service.verify_token(id_token).await.map_err(|err| match err {
        IdentityError::Disabled => {
            ApiError::ServiceUnavailable("Identity provider login is not configured".to_string())
        }
        IdentityError::Rejected => ApiError::Unauthorized("Identity token rejected"),
        IdentityError::Request(message) => {
            ApiError::internal(message, "Identity provider request failed")
        }
    })
}

fn normalize_email(email: Option<&str>) -> Option<String> {
    email.map(|value| value.trim().to_lowercase()).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests;
