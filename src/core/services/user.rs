use crate::core::models::user::{Insert, Login, Signup, User};
use crate::core::ports::repository::{TxStore, Store, UserCommon};
use crate::error::Error;
use crate::hex::ToHex;
use crate::rand::{distributions::Alphanumeric, thread_rng, Rng};
use crate::sha2::{Digest, Sha256};

fn hash_password(pass: &str, slt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pass);
    hasher.update(slt);
    hasher.finalize().encode_hex()
}

fn random_salt() -> String {
    thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect()
}

pub async fn signup<T>(mut tx: T, signup: Signup, admin_code: Option<&str>) -> Result<i32, Error>
where
    T: TxStore,
{
    if signup.username.trim().is_empty() || signup.password.is_empty() {
        return Err(Error::Validation("username and password are required".into()));
    }
    let is_admin = match (signup.admin_code.as_deref(), admin_code) {
        (None, _) => false,
        (Some(given), Some(expected)) if given == expected => true,
        (Some(_), _) => return Err(Error::BusinessError("invalid admin code".into())),
    };
    if UserCommon::get_by_username(&mut tx, &signup.username).await?.is_some() {
        tx.rollback().await?;
        return Err(Error::BusinessError("username already taken".into()));
    }
    let slt = random_salt();
    let id = UserCommon::insert(
        &mut tx,
        Insert {
            username: signup.username,
            password: hash_password(&signup.password, &slt),
            salt: slt,
            is_admin,
        },
    )
    .await?;
    tx.commit().await?;
    log::info!("user {} signed up (admin: {})", id, is_admin);
    Ok(id)
}

pub async fn authenticate<S>(store: &mut S, Login { username, password }: Login) -> Result<User, Error>
where
    S: Store,
{
    match UserCommon::get_by_username(store, &username).await? {
        Some(user) if hash_password(&password, &user.salt) == user.password => Ok(user),
        _ => Err(Error::Forbidden),
    }
}
