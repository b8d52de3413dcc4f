//! Backend entry-point: wires REST endpoints and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use mockable::DefaultClock;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::domain::{AdoptionCommandService, AdoptionQueryService, Pet, PetId};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{adoptions, users};
use backend::outbound::MemoryStore;
#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let store = Arc::new(MemoryStore::new());
    seed_demo_pets(&store);
    let commands = Arc::new(AdoptionCommandService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(DefaultClock),
    ));
    let queries = Arc::new(AdoptionQueryService::new(store));
    let state = web::Data::new(HttpState::new(commands, queries));

    info!(%bind_addr, "starting adoption backend");
    HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(users::login)
            .configure(adoptions::configure);

        let app = App::new().app_data(state.clone()).wrap(Trace).service(api);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run()
    .await
}

/// Seed a few pets so the lifecycle can be exercised without a pet service.
fn seed_demo_pets(store: &MemoryStore) {
    for (id, name) in [
        ("00000000-0000-0000-0000-000000000301", "Biscuit"),
        ("00000000-0000-0000-0000-000000000302", "Clover"),
        ("00000000-0000-0000-0000-000000000303", "Maple"),
    ] {
        match id.parse::<PetId>() {
            Ok(pet_id) => {
                store.insert_pet(Pet::available(pet_id, name));
                info!(pet_id = %pet_id, name, "seeded demo pet");
            }
            Err(error) => warn!(%error, id, "skipping malformed demo pet id"),
        }
    }
}
