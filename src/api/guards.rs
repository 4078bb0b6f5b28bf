use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::db::models::{StudentProfile, User};
use crate::repositories;

pub(crate) struct CurrentUser(pub(crate) User);
pub(crate) struct CurrentStaff(pub(crate) User);

/// Authenticated user together with a verified student profile. Staff
/// accounts without a profile do not pass this guard; the endpoints they
/// need live under /admin.
pub(crate) struct CurrentStudent {
    pub(crate) user: User,
    pub(crate) profile: StudentProfile,
}

/// Authenticated account for gated content: a verified student profile, or
/// a staff account (which carries no profile and skips enrollment checks).
pub(crate) struct CurrentViewer {
    pub(crate) user: User,
    pub(crate) profile: Option<StudentProfile>,
}

/// Bearer token is optional; public endpoints use this to surface gated
/// fields to enrolled students while staying anonymous-friendly.
pub(crate) struct OptionalUser(pub(crate) Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;

        let claims = security::verify_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized("Invalid authentication credentials"))?;

        let user = repositories::users::find_by_id(app_state.db(), &claims.sub)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

        let Some(user) = user else {
            return Err(ApiError::Unauthorized("User not found"));
        };

        if !user.is_active {
            return Err(ApiError::Unauthorized("Invalid authentication credentials"));
        }

        Ok(CurrentUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentStaff {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if user.is_staff {
            Ok(CurrentStaff(user))
        } else {
            Err(ApiError::Forbidden("Staff access required"))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentStudent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        let profile = repositories::student_profiles::find_by_user_id(app_state.db(), &user.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load student profile"))?;

        let Some(profile) = profile else {
            return Err(ApiError::Forbidden("Student profile not found for this account"));
        };

        if !profile.is_verified {
            return Err(ApiError::Forbidden(
                "Account is pending verification by the administrator",
            ));
        }

        if !profile.is_active {
            return Err(ApiError::Forbidden("Student profile is inactive"));
        }

        Ok(CurrentStudent { user, profile })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentViewer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        let profile = repositories::student_profiles::find_by_user_id(app_state.db(), &user.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load student profile"))?;

        match &profile {
            Some(profile) => {
                if !profile.is_verified {
                    return Err(ApiError::Forbidden(
                        "Account is pending verification by the administrator",
                    ));
                }
                if !profile.is_active {
                    return Err(ApiError::Forbidden("Student profile is inactive"));
                }
            }
            None if !user.is_staff => {
                return Err(ApiError::Forbidden("Student profile not found for this account"));
            }
            None => {}
        }

        Ok(CurrentViewer { user, profile })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if parts.headers.get(header::AUTHORIZATION).is_none() {
            return Ok(OptionalUser(None));
        }

        match CurrentUser::from_request_parts(parts, state).await {
            Ok(CurrentUser(user)) => Ok(OptionalUser(Some(user))),
            Err(_) => Ok(OptionalUser(None)),
        }
    }
}

/// Gate module content and resource delivery on enrollment. Answers 404 so
/// an unenrolled student cannot distinguish "exists" from "absent". Staff
/// accounts bypass the enrollment check.
pub(crate) async fn require_enrollment(
    state: &AppState,
    user: &User,
    profile: Option<&StudentProfile>,
    course_id: &str,
) -> Result<(), ApiError> {
    if user.is_staff {
        return Ok(());
    }

    let Some(profile) = profile else {
        return Err(ApiError::Forbidden("Student profile not found for this account"));
    };

    let enrolled = repositories::enrollments::is_enrolled(state.db(), &profile.id, course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check enrollment"))?;

    if enrolled {
        Ok(())
    } else {
        metrics::counter!("enrollment_access_denied_total").increment(1);
        Err(ApiError::NotFound("Not found".to_string()))
    }
}
