use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::session;

/// Policy check evaluated before every mutating operation: only an
/// authenticated principal may mutate team or snapshot resources. The
/// check is independent of the storage calls and runs before them.
///
/// "Authenticated" here means the demo session token (a base64-encoded
/// user record) decodes to a well-formed user. Nothing is verified
/// against a server-side session.
pub struct PolicyGuard;

impl<S, B> Transform<S, ServiceRequest> for PolicyGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = PolicyGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PolicyGuardService { service }))
    }
}

pub struct PolicyGuardService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PolicyGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Read-only traffic is public; the policy applies to mutations only
        let method = req.method();
        if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(async move {
                let res = fut.await?;
                Ok(res)
            });
        }

        let auth_header = req.headers().get("Authorization");

        match auth_header {
            Some(header_value) => {
                if let Ok(header_str) = header_value.to_str() {
                    if let Some(token) = header_str.strip_prefix("Bearer ") {
                        if let Some(user) = session::parse_bearer_token(token) {
                            req.extensions_mut().insert(user);

                            let fut = self.service.call(req);
                            return Box::pin(async move {
                                let res = fut.await?;
                                Ok(res)
                            });
                        }
                    }
                }

                Box::pin(async move {
                    Err(actix_web::error::ErrorUnauthorized("Invalid session token"))
                })
            }
            None => Box::pin(async move {
                Err(actix_web::error::ErrorUnauthorized("Missing session token"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthUser;
    use actix_web::{test, web, App, HttpResponse};

    async fn ok_handler() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn whoami(user: web::ReqData<AuthUser>) -> HttpResponse {
        HttpResponse::Ok().body(user.name.clone())
    }

    fn sample_user() -> AuthUser {
        AuthUser {
            id: "1".to_string(),
            name: "Ana".to_string(),
            email: "ana@siteboard.dev".to_string(),
            role: None,
        }
    }

    #[actix_rt::test]
    async fn test_reads_pass_without_token() {
        let app = test::init_service(
            App::new()
                .wrap(PolicyGuard)
                .route("/x", web::get().to(ok_handler)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/x").to_request()).await;
        assert!(resp.status().is_success());
    }

    #[actix_rt::test]
    async fn test_mutation_without_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(PolicyGuard)
                .route("/x", web::post().to(ok_handler)),
        )
        .await;

        let err = test::try_call_service(&app, test::TestRequest::post().uri("/x").to_request())
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), 401);
    }

    #[actix_rt::test]
    async fn test_garbage_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(PolicyGuard)
                .route("/x", web::post().to(ok_handler)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/x")
            .insert_header(("Authorization", "Bearer not-a-session"))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.error_response().status(), 401);
    }

    #[actix_rt::test]
    async fn test_valid_token_reaches_handler_with_principal() {
        let app = test::init_service(
            App::new()
                .wrap(PolicyGuard)
                .route("/x", web::post().to(whoami)),
        )
        .await;

        let token = session::to_bearer_token(&sample_user());
        let req = test::TestRequest::post()
            .uri("/x")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        assert_eq!(body, "Ana");
    }
}
