use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored account. OAuth-only accounts have no password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password_hash: String,
}

/// Editable user fields. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip)]
    pub user_id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name.unwrap_or_default(),
            phone: user.phone.unwrap_or_default(),
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_user_flattens_nulls() {
        let user = User {
            id: 3,
            email: "a@b.co".to_string(),
            password_hash: Some("hash".to_string()),
            full_name: None,
            phone: Some("+100".to_string()),
        };
        let profile = Profile::from(user);
        assert_eq!(profile.user_id, 3);
        assert_eq!(profile.full_name, "");
        assert_eq!(profile.phone, "+100");
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User {
            id: 1,
            email: "a@b.co".to_string(),
            password_hash: Some("secret-hash".to_string()),
            full_name: None,
            phone: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }

    #[test]
    fn test_profile_json_ignores_user_id() {
        let profile: Profile =
            serde_json::from_str(r#"{"user_id":99,"full_name":"X","email":"x@y.zz"}"#).unwrap();
        assert_eq!(profile.user_id, 0);
        assert_eq!(profile.phone, "");
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("user_id").is_none());
    }
}
