use crate::config::{Config, Tuning};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

pub type JpegFrame = Vec<u8>;

// Fan-out for encoded frames. Slow dashboard clients just drop frames
// off the ring.
#[derive(Clone)]
pub struct FrameHub {
    tx: broadcast::Sender<JpegFrame>,
}

impl FrameHub {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JpegFrame> {
        self.tx.subscribe()
    }

    pub fn publish(&self, frame: JpegFrame) {
        let _ = self.tx.send(frame);
    }
}

impl Default for FrameHub {
    fn default() -> Self {
        Self::new()
    }
}

// One hub per watchable surface: the annotated color frame, the three
// channel masks, the cleaned mask and the annotated depth frame.
#[derive(Clone, Default)]
pub struct Hubs {
    pub color: FrameHub,
    pub hue: FrameHub,
    pub sat: FrameHub,
    pub val: FrameHub,
    pub closing: FrameHub,
    pub depth: FrameHub,
}

#[derive(Clone)]
pub struct AppState {
    pub hubs: Hubs,
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub fn new(hubs: Hubs, config: Config) -> Self {
        Self {
            hubs,
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub async fn tuning(&self) -> Tuning {
        self.config.read().await.tuning()
    }

    pub async fn apply_tuning(&self, tuning: Tuning) {
        self.config.write().await.apply_tuning(tuning);
    }

    // For the synchronous pipeline thread; must not be called from an
    // async context.
    pub fn blocking_tuning(&self) -> Tuning {
        self.config.blocking_read().tuning()
    }

    pub fn blocking_config(&self) -> Config {
        self.config.blocking_read().clone()
    }
}
