//! YouTube search and embed reachability.

mod dto;
mod probe;
mod search;

pub use dto::{SearchItem, SearchItemId, SearchResponse, Snippet, Thumbnail, Thumbnails};
pub use probe::HttpVideoProbe;
pub use search::{YOUTUBE_API_KEY_VAR, YouTubeSearchClient};
