/*
 * Responsibility
 * - /me response DTO: what the middleware chain produced for this request
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub request_id: Option<String>,
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}
