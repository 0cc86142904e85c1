use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;

pub mod login;
pub mod me;
pub mod register;

pub use login::login;
pub use me::me;
pub use register::register;

/// Public view of a user; never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
