mod image;
mod routes;
mod server;
mod state;
mod ui;

pub use image::{gray_to_jpeg, rgb_to_jpeg};
pub use server::run_dashboard_server;
pub use state::{AppState, FrameHub, Hubs, JpegFrame};
