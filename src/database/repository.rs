use crate::entities::{
    product_entity as products, sms_code_entity as sms_codes, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, Product, SmsCode, User};
use crate::utils::Clock;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

/// Storage operations consumed by the sign-in flow and the product listing.
///
/// "Not found" is `Ok(None)`, never an error.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Inserts the code for `phone`, or overwrites code and expiry of the existing row.
    /// Expiry is the clock's now plus `expires_in_minutes`.
    async fn upsert_sms_code(&self, phone: &str, code: &str, expires_in_minutes: i64)
    -> AppResult<()>;

    async fn get_sms_code(&self, phone: &str) -> AppResult<Option<SmsCode>>;

    /// Removes the row only while it still holds `code`, so a newer code survives.
    async fn delete_sms_code(&self, phone: &str, code: &str) -> AppResult<()>;

    async fn get_user_by_phone(&self, phone: &str) -> AppResult<Option<User>>;

    async fn insert_user(&self, user: NewUser) -> AppResult<User>;

    async fn list_products(&self) -> AppResult<Vec<Product>>;
}

fn expiry_after(now: DateTime<Tz>, minutes: i64) -> AppResult<DateTime<Utc>> {
    Duration::try_minutes(minutes)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| {
            AppError::InternalError(format!("sms code lifetime of {minutes} minutes is out of range"))
        })
}

pub struct SeaOrmRepository {
    pool: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl SeaOrmRepository {
    pub fn new(pool: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl Repository for SeaOrmRepository {
    async fn upsert_sms_code(
        &self,
        phone: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> AppResult<()> {
        log::info!("writing sms code to database, phone_number: {phone}");
        let expires_at = expiry_after(self.clock.now(), expires_in_minutes)?;

        let model = sms_codes::ActiveModel {
            phone: Set(phone.to_string()),
            code: Set(code.to_string()),
            expires_at: Set(expires_at),
            ..Default::default()
        };

        // single statement, the unique index on phone arbitrates concurrent requests
        sms_codes::Entity::insert(model)
            .on_conflict(
                OnConflict::column(sms_codes::Column::Phone)
                    .update_columns([sms_codes::Column::Code, sms_codes::Column::ExpiresAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.pool)
            .await?;

        log::info!("sms code successfully written to the database");
        Ok(())
    }

    async fn get_sms_code(&self, phone: &str) -> AppResult<Option<SmsCode>> {
        log::info!("receiving sms code from database");
        let found = sms_codes::Entity::find()
            .filter(sms_codes::Column::Phone.eq(phone))
            .one(&self.pool)
            .await?;

        if found.is_none() {
            log::info!("sms code not found in database");
        }
        Ok(found.map(SmsCode::from))
    }

    async fn delete_sms_code(&self, phone: &str, code: &str) -> AppResult<()> {
        sms_codes::Entity::delete_many()
            .filter(sms_codes::Column::Phone.eq(phone))
            .filter(sms_codes::Column::Code.eq(code))
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_user_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        log::info!("receiving user by phone number from database");
        let found = users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .one(&self.pool)
            .await?;
        Ok(found.map(User::from))
    }

    async fn insert_user(&self, user: NewUser) -> AppResult<User> {
        log::info!("register new user");
        let inserted = users::ActiveModel {
            name: Set(user.name),
            phone: Set(user.phone),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("user successfully inserted to database");
        Ok(User::from(inserted))
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        log::info!("receiving all products from database");
        let rows = products::Entity::find()
            .order_by_asc(products::Column::Id)
            .all(&self.pool)
            .await?;

        log::info!("products successfully received");
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
