use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{time::Duration, Key, SameSite};
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use env_logger::Env;
use podium::app_config::APP_CONFIG;
use podium::db::init_db;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    init_db(std::env::var("DATABASE_URL").expect("DATABASE_URL must be set.")).await;

    let secret_key = match std::env::var("SECRET_KEY") {
        Ok(key) if key.len() >= 64 => Key::from(key.as_bytes()),
        Ok(_) => {
            log::warn!("SECRET_KEY must be at least 64 bytes. Session cookies will be signed with a generated key and invalidate on every restart.");
            Key::generate()
        }
        Err(_) => {
            log::warn!("SECRET_KEY is not set. Session cookies will be signed with a generated key and invalidate on every restart.");
            Key::generate()
        }
    };

    let (site_name, address, port, session_minutes) = {
        let config = APP_CONFIG.read().expect("Config lock poisoned");
        (
            config.site.name.clone(),
            config.server.address.clone(),
            config.server.port,
            config.session.timeout_minutes,
        )
    };

    log::info!("Starting {} on {}:{}", site_name, address, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_same_site(SameSite::Lax)
                    .session_lifecycle(
                        PersistentSession::default()
                            .session_ttl(Duration::minutes(session_minutes as i64)),
                    )
                    .build(),
            )
            .configure(podium::web::configure)
    })
    .bind((address.as_str(), port))?
    .run()
    .await
}
