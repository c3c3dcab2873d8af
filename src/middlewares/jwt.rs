use crate::actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage,
};
use crate::context::UserInfo;
use crate::core::tokener::{Payload, Tokener};
use crate::error::Error as AppError;
use crate::futures_util::future::LocalBoxFuture;
use crate::impls::tokener::jwt::JWT;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

pub static JWT_TOKEN: &str = "JWT_TOKEN";

#[derive(Debug, Deserialize, Serialize)]
pub struct Claim {
    pub user: String,
    pub admin: bool,
    pub exp: i64,
}

impl Claim {
    pub fn new(user_id: i32, admin: bool) -> Self {
        Self {
            user: user_id.to_string(),
            admin,
            exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp(),
        }
    }
}

impl Payload for Claim {
    fn subject(&self) -> &str {
        &self.user
    }

    fn is_admin(&self) -> bool {
        self.admin
    }
}

fn bearer(req: &ServiceRequest) -> Option<String> {
    if let Some(value) = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return Some(value.strip_prefix("Bearer ").unwrap_or(value).trim().to_owned());
    }
    req.cookie(JWT_TOKEN).map(|c| c.value().to_owned())
}

pub struct JWTMiddleware {
    secret: Vec<u8>,
}

impl JWTMiddleware {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JWTMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JWTService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JWTService {
            tokener: JWT::new(self.secret.clone()),
            next_service: service,
        }))
    }
}

pub struct JWTService<S> {
    tokener: JWT,
    next_service: S,
}

impl<S, B> Service<ServiceRequest> for JWTService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(next_service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user = bearer(&req).ok_or(AppError::Unauthorized).and_then(|token| {
            let claim: Claim = self.tokener.verify_token(&token)?;
            Ok(UserInfo {
                id: claim.user_id()?,
                is_admin: claim.is_admin(),
            })
        });
        match user {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let res_fut = self.next_service.call(req);
                Box::pin(async move { res_fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(e) => {
                log::debug!("rejected request to {}: {}", req.path(), e);
                Box::pin(async move { Ok(req.error_response(AppError::Unauthorized).map_into_right_body()) })
            }
        }
    }
}
