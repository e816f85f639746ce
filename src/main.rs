//! Server binary. Loads configuration, registers the pre-made routes and
//! starts serving.

use axum::response::{Html, IntoResponse};
use axum::routing::get;

use photobin::axum::{ConfigExt, Router};
use photobin::{config, Config};

#[tokio::main]
async fn main() -> photobin::Result<()> {
    let config: Config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "no usable {} ({}), falling back to defaults",
                config::CONFIG_FILE,
                e.kind
            );
            Config::default()
        }
    };

    // main application router
    let mut router = Router::new().route("/", get(home));

    // attach pre-made routes
    router = photobin::axum::router(router, &config);

    // start the application
    photobin::axum::start(router, config).await
}

async fn home(axum::Extension(config): ConfigExt) -> impl IntoResponse {
    Html(format!(
        "{} v{} | <a href=\"/api/photos\">photos</a>",
        config.name, config.version
    ))
}
