use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use quizportal::config::{AuthSettings, Config};
use quizportal::configure;
use quizportal::core::ports::repository::Manager;
use quizportal::database::memory::MemoryManager;
use quizportal::database::sqlx::PgSqlxManager;
use sqlx::postgres::PgPoolOptions;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info,actix_web=info"));
    let config = Config::from_env().context("failed to load configuration")?;
    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await
                .context("failed to connect to database")?;
            sqlx::migrate!().run(&pool).await.context("failed to run migrations")?;
            serve(PgSqlxManager::new(pool), &config).await
        }
        None => {
            log::warn!("DATABASE_URL not set, quizzes and results are kept in memory");
            serve(MemoryManager::default(), &config).await
        }
    }
}

async fn serve<M>(manager: M, config: &Config) -> anyhow::Result<()>
where
    M: Manager + Clone + Send + 'static,
{
    let settings = AuthSettings::from(config);
    log::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || App::new().wrap(Logger::default()).configure(configure(manager.clone(), settings.clone())))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;
    Ok(())
}
