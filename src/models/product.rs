use crate::entities::product_entity;
use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct Product {
    pub id: i32,
    pub name: String,
}

impl From<product_entity::Model> for Product {
    fn from(m: product_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
