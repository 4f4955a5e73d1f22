/*
 * Responsibility
 * - The "request identity" type handlers see
 * - The middleware populates it from (unverified) JWT claims and stores it in
 *   request extensions; handlers only ever receive this type
 *
 * Notes
 * - An empty context means "anonymous request" - parse failures never reject
 * - Signature verification happens at the gateway, so nothing here is proof
 *   of identity on its own; treat it as routing/display data
 */

use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub token_type: Option<String>,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
    /// Full claim set for consumers that need non-standard claims.
    pub raw_claims: Option<Value>,
}

impl UserContext {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    pub fn has_all_roles(&self, roles: &[&str]) -> bool {
        roles.iter().all(|role| self.has_role(role))
    }
}
