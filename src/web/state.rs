use std::sync::Arc;
use tokio::sync::Mutex;

use crate::feed::Feed;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub feed: Arc<Mutex<Feed>>,
}
