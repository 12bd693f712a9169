pub use pulse_core::{Chapter, DatedEvent, Layout, Story, Track};

/// The node currently open in the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    pub track: Track,
    pub event: DatedEvent,
}

pub async fn fetch_story() -> Result<Story, String> {
    let resp = gloo_net::http::Request::get("/data/chapters.json")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    resp.json::<Story>().await.map_err(|e| e.to_string())
}
