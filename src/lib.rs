extern crate actix_web;
extern crate chrono;
extern crate dotenv;
extern crate futures_util;
extern crate hex;
extern crate jsonwebtoken;
extern crate rand;
extern crate serde;
extern crate sha2;
extern crate sqlx;
extern crate thiserror;
extern crate tokio;

pub mod config;
pub mod context;
pub mod core;
pub mod database;
pub mod error;
pub mod handlers;
pub mod impls;
pub mod middlewares;
pub mod portal;
pub mod request;
pub mod response;

pub use handlers::configure;
