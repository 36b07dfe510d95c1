//! Current user endpoint

use axum::Json;

use crate::models::user::UserInfo;

use super::CurrentUser;

/// Get the authenticated account and its roles
#[utoipa::path(
    get,
    path = "/user/me",
    tag = "users",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserInfo> {
    Json(user)
}
