use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
pub trait Payload: Serialize + for<'d> Deserialize<'d> {
    fn subject(&self) -> &str;
    fn is_admin(&self) -> bool;

    fn user_id(&self) -> Result<i32, Error> {
        self.subject().parse().map_err(|_| Error::Unauthorized)
    }
}

pub trait Tokener<P: Payload> {
    fn gen_token(&self, payload: &P) -> Result<String, Error>;
    fn verify_token(&self, token: &str) -> Result<P, Error>;
}
