use crate::entities::user_entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub phone: String,
}

/// A user about to be registered; the id comes from the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
}

impl NewUser {
    /// No name is collected during sign-in.
    pub fn with_phone(phone: &str) -> Self {
        Self {
            name: String::new(),
            phone: phone.to_string(),
        }
    }
}

impl From<user_entity::Model> for User {
    fn from(m: user_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            phone: m.phone,
        }
    }
}
