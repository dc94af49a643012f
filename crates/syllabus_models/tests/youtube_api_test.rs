#![cfg(all(feature = "youtube", feature = "api"))]

//! Live YouTube calls. Run with `--features api` and YOUTUBE_API_KEY set.

use std::time::Duration;
use syllabus_interface::{VideoProbe, VideoSearch};
use syllabus_models::{HttpVideoProbe, YouTubeSearchClient};
use syllabus_rate_limit::SyllabusConfig;

#[tokio::test]
async fn test_search_then_probe_embed() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = SyllabusConfig::bundled()?;
    let search = YouTubeSearchClient::new(&config.video)?;

    let hits = search.search("rust ownership tutorial").await?;
    let first = hits.first().ok_or_else(|| anyhow::anyhow!("no results"))?;

    let probe = HttpVideoProbe::new(Duration::from_secs(5))?;
    let status = probe
        .head_check(&format!("{}{}", config.video.embed_base, first.video_id))
        .await?;
    assert!((200..300).contains(&status));
    Ok(())
}
