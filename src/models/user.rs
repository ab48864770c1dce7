use serde::Serialize;
use uuid::Uuid;

/// Dashboard user; `password` holds an argon2 PHC string
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            name: "User".to_string(),
            email: "user@nextmail.com".to_string(),
            password: "$argon2id$v=19$secret".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "user@nextmail.com");
    }
}
