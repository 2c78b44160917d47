use crate::graphql::AppSchema;
use crate::middlewares::BearerToken;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

pub const GRAPHQL_PATH: &str = "/query";

pub async fn graphql(
    schema: web::Data<AppSchema>,
    req: HttpRequest,
    request: GraphQLRequest,
) -> GraphQLResponse {
    // set by BearerTokenMiddleware
    let token = req
        .extensions()
        .get::<BearerToken>()
        .cloned()
        .unwrap_or_default();

    schema.execute(request.into_inner().data(token)).await.into()
}

pub async fn playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

pub fn graphql_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(playground))
        .route(GRAPHQL_PATH, web::post().to(graphql));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::schema::testing::test_schema;
    use crate::middlewares::BearerTokenMiddleware;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_authorization_header_reaches_viewer() {
        let (schema, _repo) = test_schema();
        let app = test::init_service(
            App::new()
                .wrap(BearerTokenMiddleware)
                .app_data(web::Data::new(schema))
                .configure(graphql_config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(GRAPHQL_PATH)
            .set_json(json!({
                "query": r#"mutation { requestSignInCode(input: { phone: "+79990000000" }) { code } }"#
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["requestSignInCode"], Value::Null);

        let req = test::TestRequest::post()
            .uri(GRAPHQL_PATH)
            .set_json(json!({
                "query": r#"mutation { signInByCode(input: { phone: "+79990000000", code: "1234" }) { ... on SignInPayload { token } } }"#
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["data"]["signInByCode"]["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(GRAPHQL_PATH)
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "query": "{ viewer { user { phone } } }" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["viewer"]["user"]["phone"], "+79990000000");

        let req = test::TestRequest::post()
            .uri(GRAPHQL_PATH)
            .set_json(json!({ "query": "{ viewer { user { phone } } }" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["errors"][0]["extensions"]["code"], "TOKEN_EMPTY");
    }

    #[actix_web::test]
    async fn test_header_is_ignored_without_middleware() {
        let (schema, _repo) = test_schema();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(schema))
                .configure(graphql_config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(GRAPHQL_PATH)
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .set_json(json!({ "query": "{ viewer { user { phone } } }" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["errors"][0]["extensions"]["code"], "TOKEN_EMPTY");
    }

    #[actix_web::test]
    async fn test_playground_is_served() {
        let app = test::init_service(App::new().configure(graphql_config)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
