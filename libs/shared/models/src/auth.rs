use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Identity collaborator contract. The external provider resolves the
/// current session to an authenticated user or to none.
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;
}

/// Session-scoped provider holding the identity resolved at sign-in.
pub struct SessionAuth {
    user: Option<User>,
}

impl SessionAuth {
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl AuthProvider for SessionAuth {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}
