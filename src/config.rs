use crate::dotenv;
use crate::error::Error;

pub static DATABASE_URL: &str = "DATABASE_URL";
pub static DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub static JWT_SECRET: &str = "JWT_SECRET";
pub static ADMIN_CODE: &str = "ADMIN_CODE";
pub static BIND_HOST: &str = "BIND_HOST";
pub static BIND_PORT: &str = "BIND_PORT";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub jwt_secret: Vec<u8>,
    pub admin_code: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let jwt_secret = dotenv::var(JWT_SECRET)?;
        if jwt_secret.is_empty() {
            return Err(Error::Validation(format!("{} must not be empty", JWT_SECRET)));
        }
        Ok(Self {
            database_url: dotenv::var(DATABASE_URL).ok().filter(|v| !v.is_empty()),
            max_connections: parse_or(DATABASE_MAX_CONNECTIONS, 5)?,
            jwt_secret: jwt_secret.into_bytes(),
            admin_code: dotenv::var(ADMIN_CODE).ok().filter(|v| !v.is_empty()),
            host: dotenv::var(BIND_HOST).unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or(BIND_PORT, 8000)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, Error> {
    match dotenv::var(key) {
        Ok(v) => v.parse().map_err(|_| Error::Validation(format!("invalid value for {}: {}", key, v))),
        Err(_) => Ok(default),
    }
}

/// Runtime settings the request handlers need, shared through `web::Data`.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: Vec<u8>,
    pub admin_code: Option<String>,
}

impl From<&Config> for AuthSettings {
    fn from(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            admin_code: config.admin_code.clone(),
        }
    }
}
