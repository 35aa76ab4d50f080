/// Authentication context for Axum handlers
///
/// After the API's bearer-token middleware validates a JWT, it inserts an
/// [`AuthContext`] into the request extensions. Handlers extract it with
/// Axum's `Extension` extractor to learn who is calling and with what role.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use fieldbook_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}, admin: {}", auth.user_id, auth.is_admin())
/// }
/// ```

use crate::auth::jwt::Claims;
use crate::models::user::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authentication context added to request extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Role the user held when the token was issued
    pub role: Role,
}

impl AuthContext {
    /// Creates auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }

    /// Whether the caller holds the ADMIN role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_claims() {
        let claims = Claims::new(Uuid::new_v4(), Role::Admin);
        let ctx = AuthContext::from_claims(&claims);

        assert_eq!(ctx.user_id, claims.sub);
        assert!(ctx.is_admin());
    }

    #[test]
    fn test_employee_is_not_admin() {
        let claims = Claims::new(Uuid::new_v4(), Role::Employee);
        let ctx = AuthContext::from_claims(&claims);

        assert!(!ctx.is_admin());
    }
}
