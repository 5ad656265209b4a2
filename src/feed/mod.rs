mod error;
mod feed;
mod types;

pub use error::FeedError;
pub use feed::Feed;
pub use types::{FeedMode, FeedSettings, FeedStatus};
