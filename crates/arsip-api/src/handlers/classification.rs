//! Classification schedule handlers.

use axum::Json;

use arsip_entity::archive::retention::{ClassificationRule, RETENTION_RULES};

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;

/// GET /api/classifications
///
/// The retention schedule by classification prefix, as applied by the
/// status engine.
pub async fn list_classifications(
    _auth: AuthUser,
) -> Json<ApiResponse<&'static [ClassificationRule]>> {
    Json(ApiResponse::ok(RETENTION_RULES))
}
