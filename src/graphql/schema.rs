//! GraphQL schema: `requestSignInCode` / `signInByCode` mutations and
//! `products` / `viewer` queries.

use crate::middlewares::BearerToken;
use crate::models::*;
use crate::services::{AuthService, ProductService};
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Result as GqlResult, Schema};

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(auth_service: AuthService, product_service: ProductService) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(auth_service)
        .data(product_service)
        .finish()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn products(&self, ctx: &Context<'_>) -> GqlResult<Vec<Product>> {
        let product_service = ctx.data::<ProductService>()?;
        product_service
            .get_all_products()
            .await
            .map_err(|e| e.extend())
    }

    /// The signed-in caller, identified by the `Authorization` header.
    async fn viewer(&self, ctx: &Context<'_>) -> GqlResult<Viewer> {
        let auth_service = ctx.data::<AuthService>()?;
        let token = ctx
            .data_opt::<BearerToken>()
            .map(|t| t.0.as_str())
            .unwrap_or_default();

        auth_service.resolve_viewer(token).map_err(|e| e.extend())
    }
}

pub struct MutationRoot;

// Unexpected failures are logged and reduced to a generic payload here.
#[Object]
impl MutationRoot {
    /// Returns null when the code was sent.
    async fn request_sign_in_code(
        &self,
        ctx: &Context<'_>,
        input: RequestSignInCodeInput,
    ) -> GqlResult<Option<ErrorPayload>> {
        let auth_service = ctx.data::<AuthService>()?;
        match auth_service.request_sign_in_code(&input.phone).await {
            Ok(payload) => Ok(payload),
            Err(e) => {
                log::error!("unable to request sign in code: {e}");
                Ok(Some(ErrorPayload::internal()))
            }
        }
    }

    async fn sign_in_by_code(
        &self,
        ctx: &Context<'_>,
        input: SignInByCodeInput,
    ) -> GqlResult<SignInOrErrorPayload> {
        let auth_service = ctx.data::<AuthService>()?;
        match auth_service.sign_in_by_code(&input.phone, &input.code).await {
            Ok(payload) => Ok(payload),
            Err(e) => {
                log::error!("unable to sign in by code: {e}");
                Ok(SignInOrErrorPayload::Error(ErrorPayload::internal()))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::config::SmsConfig;
    use crate::database::repository::testing::InMemoryRepository;
    use crate::external::LogSmsSender;
    use crate::utils::clock::testing::FixedClock;
    use crate::utils::code_generator::testing::FixedCodeGenerator;
    use crate::utils::{Clock, JwtService};
    use chrono::Utc;
    use std::sync::Arc;

    /// Schema over an in-memory store whose generator always yields "1234".
    pub fn test_schema() -> (AppSchema, Arc<InMemoryRepository>) {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::at(Utc::now()));
        let repo = Arc::new(InMemoryRepository::new(clock.clone()));
        let auth = AuthService::new(
            repo.clone(),
            JwtService::new("graphql_secret", 60, clock.clone()),
            Arc::new(FixedCodeGenerator::new("1234")),
            Arc::new(LogSmsSender),
            clock,
            &SmsConfig {
                expires_in: 10,
                consume_on_success: false,
            },
        );
        let schema = build_schema(auth, ProductService::new(repo.clone()));
        (schema, repo)
    }
}
