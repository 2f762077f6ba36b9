#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use ::axum::Server;
use dotenvy::dotenv;
use std::{env, net::SocketAddr, process};
use tracing::{error, info};

use crate::{
    axum::{app, state},
    utils::logger,
};
use ::strategist::{Assistant, Config};

mod axum;
mod http;
mod utils;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let _guard = logger::setup();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            error!("{err:#}");
            process::exit(1);
        }
    };

    let assistant = match Assistant::connect(&config).await {
        Ok(assistant) => assistant,
        Err(err) => {
            error!("{err:#}");
            process::exit(1);
        }
    };

    let app = app::create(state::create(assistant));
    let address = SocketAddr::from((
        [0, 0, 0, 0],
        env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000),
    ));

    info!("⛏️ Blasting Strategist started on http://{address}");
    Server::bind(&address)
        .serve(app.into_make_service())
        .await
        .expect("Failed to start server");
}
