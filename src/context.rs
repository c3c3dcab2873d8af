use crate::actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use crate::error::Error;
use std::future::{ready, Ready};

/// The authenticated caller, put into the request extensions by the JWT middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserInfo {
    pub id: i32,
    pub is_admin: bool,
}

impl UserInfo {
    /// Admins may act on behalf of any user, everyone else only on themselves.
    pub fn may_act_for(&self, user_id: i32) -> bool {
        self.is_admin || self.id == user_id
    }
}

impl FromRequest for UserInfo {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(req.extensions().get::<Self>().copied().ok_or(Error::Unauthorized))
    }
}

/// An authenticated caller with the admin flag set.
#[derive(Debug, Clone, Copy)]
pub struct Admin(pub UserInfo);

impl FromRequest for Admin {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match req.extensions().get::<UserInfo>() {
            Some(user) if user.is_admin => Ok(Admin(*user)),
            Some(_) => Err(Error::Forbidden),
            None => Err(Error::Unauthorized),
        })
    }
}
