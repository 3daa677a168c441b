use super::routes::{
    get_tuning_handler, stream_closing, stream_color, stream_depth, stream_hue, stream_sat,
    stream_val, update_tuning_handler,
};
use super::state::{AppState, Hubs};
use crate::config::Config;
use axum::routing::get;
use std::net::SocketAddr;

pub async fn run_dashboard_server(hubs: Hubs, config: Config) -> anyhow::Result<AppState> {
    let port = config.web.port;
    let state = AppState::new(hubs, config);
    let state_for_axum = state.clone();

    let app = axum::Router::new()
        .route("/", get(super::ui::index_page))
        .route(
            "/config",
            get(get_tuning_handler).post(update_tuning_handler),
        )
        .route("/stream/color", get(stream_color))
        .route("/stream/hue", get(stream_hue))
        .route("/stream/sat", get(stream_sat))
        .route("/stream/val", get(stream_val))
        .route("/stream/closing", get(stream_closing))
        .route("/stream/depth", get(stream_depth))
        .with_state(state_for_axum);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard listening on http://{}", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Serving error: {}", e)
        }
    });

    Ok(state)
}
