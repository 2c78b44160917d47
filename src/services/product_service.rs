use crate::database::Repository;
use crate::error::AppResult;
use crate::models::Product;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn Repository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    pub async fn get_all_products(&self) -> AppResult<Vec<Product>> {
        self.repository.list_products().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repository::testing::InMemoryRepository;
    use crate::utils::clock::testing::FixedClock;
    use chrono::Utc;

    #[tokio::test]
    async fn test_get_all_products() {
        let repo = Arc::new(InMemoryRepository::new(Arc::new(FixedClock::at(Utc::now()))));
        repo.add_product("Coffee");
        repo.add_product("Tea");

        let products = ProductService::new(repo).get_all_products().await.unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Coffee", "Tea"]);
    }

    #[tokio::test]
    async fn test_storage_failure_is_an_error() {
        let repo = Arc::new(InMemoryRepository::new(Arc::new(FixedClock::at(Utc::now()))));
        repo.fail_all(true);
        assert!(ProductService::new(repo).get_all_products().await.is_err());
    }
}
