pub mod counter;
pub mod photo;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::Extension;
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::{Config, Database};

pub type Router = axum::Router;

pub type ConfigExt<C = Config> = Extension<Arc<C>>;
pub type DbExt = Extension<Arc<Database>>;
/// Shared counter with process lifetime, owned by the server and handed to
/// the counter routes. Restarting the server resets it.
pub type CounterExt = Extension<Arc<AtomicU64>>;

/// Registers pre-made routes on the provided router.
///
/// Meant to be used if there is a need to register custom middleware that will
/// run on these routes.
///
/// # Configurable routes
///
/// It's possible to customize the routes registered with this function through
/// relevant config declarations. This is helpful in cases where we want to
/// still register the same route with the same pre-made handler but also add
/// a middleware layer on top of that route.
pub fn router(mut router: Router, config: &Config) -> Router {
    router = conditional_merge("photo", router, photo::router(), config);
    conditional_merge("counter", router, counter::router(), config)
}

fn conditional_merge(route: &str, routera: Router, routerb: Router, config: &Config) -> Router {
    if config.routes.enable.contains(&route.to_string())
        || !config.routes.disable.contains(&route.to_string())
    {
        routera.merge(routerb)
    } else {
        routera
    }
}

/// Registers pre-made routes on the provided router, initializes application
/// state and starts the web server.
pub async fn start(router: Router, config: Config) -> Result<()> {
    start_with(Database::new(&config.db.path)?, router, config).await
}

pub async fn start_with(db: Database, mut router: Router, config: Config) -> Result<()> {
    if config.tracing.enabled {
        crate::tracing::init(&config).unwrap_or_else(|e| {
            log::warn!("failed to initialize tracing (perhaps it was already initialized?): {e}")
        });
    }

    // Provide initial state as defined in config
    if config.init.enabled {
        crate::init::initialize(&config, &db)?;
    }

    // Generate mock data. Basically we want to be able to create a full
    // "synthetic" state consisting of all the different data items.
    if config.dev.enabled && config.dev.mock {
        crate::mock::generate(&config, &db)?;
    }

    if config.assets.serve {
        router = router.nest_service(
            "/assets",
            tower_http::services::ServeDir::new(&config.assets.path),
        );
    }

    // The counter lives exactly as long as the server process. No persistence.
    let counter = Arc::new(AtomicU64::new(0));

    let addr = config.address;

    let router = router
        // Register common state extensions for all routes
        .layer(Extension(Arc::new(config)))
        .layer(Extension(Arc::new(db)))
        .layer(Extension(counter))
        .layer(TraceLayer::new_for_http());

    // Serve the application
    tracing::info!("starting server at {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await.map_err(|e| e.into())
}
