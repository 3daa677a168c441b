use super::state::{AppState, FrameHub};
use crate::config::Tuning;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::BytesMut;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

pub async fn stream_color(State(state): State<AppState>) -> impl IntoResponse {
    stream_mjpeg_internal(state.hubs.color).await
}

pub async fn stream_hue(State(state): State<AppState>) -> impl IntoResponse {
    stream_mjpeg_internal(state.hubs.hue).await
}

pub async fn stream_sat(State(state): State<AppState>) -> impl IntoResponse {
    stream_mjpeg_internal(state.hubs.sat).await
}

pub async fn stream_val(State(state): State<AppState>) -> impl IntoResponse {
    stream_mjpeg_internal(state.hubs.val).await
}

pub async fn stream_closing(State(state): State<AppState>) -> impl IntoResponse {
    stream_mjpeg_internal(state.hubs.closing).await
}

pub async fn stream_depth(State(state): State<AppState>) -> impl IntoResponse {
    stream_mjpeg_internal(state.hubs.depth).await
}

async fn stream_mjpeg_internal(hub: FrameHub) -> impl IntoResponse {
    let rx = hub.subscribe();
    let stream = BroadcastStream::new(rx)
        .filter_map(|result| result.ok())
        .map(|frame| {
            let mut buf = BytesMut::new();
            buf.extend_from_slice(b"--frame\r\n");
            buf.extend_from_slice(b"Content-Type: image/jpeg\r\n");
            buf.extend_from_slice(format!("Content-Length: {}\r\n\r\n", frame.len()).as_bytes());
            buf.extend_from_slice(&frame);
            buf.extend_from_slice(b"\r\n");
            Ok::<_, std::io::Error>(buf.freeze())
        });

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "multipart/x-mixed-replace; boundary=frame",
        )],
        axum::body::Body::from_stream(stream),
    )
}

pub async fn get_tuning_handler(State(state): State<AppState>) -> Json<Tuning> {
    Json(state.tuning().await)
}

pub async fn update_tuning_handler(
    State(state): State<AppState>,
    Json(new_tuning): Json<Tuning>,
) -> impl IntoResponse {
    tracing::info!("Received tuning update request");
    tracing::debug!("New tuning values: {:?}", new_tuning);
    state.apply_tuning(new_tuning).await;
    StatusCode::OK
}
