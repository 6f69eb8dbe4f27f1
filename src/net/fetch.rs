use url::Url;

use crate::error::EngineError;

/// Result of fetching a URL.
#[derive(Clone)]
pub struct FetchResult {
    pub html: String,
    pub url: String,
    pub status: u16,
}

/// Fetch a URL and return the HTML content (blocking).
pub fn fetch_url(url_str: &str) -> Result<FetchResult, EngineError> {
    // Normalize URL
    let url = if !url_str.starts_with("http://") && !url_str.starts_with("https://") {
        format!("https://{}", url_str)
    } else {
        url_str.to_string()
    };

    let parsed =
        Url::parse(&url).map_err(|e| EngineError::Fetch(format!("invalid URL: {}", e)))?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("diorama/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| EngineError::Fetch(format!("client error: {}", e)))?;

    let response = client
        .get(parsed.as_str())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .map_err(|e| EngineError::Fetch(format!("request failed: {}", e)))?;

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let html = response
        .text()
        .map_err(|e| EngineError::Fetch(format!("body read failed: {}", e)))?;

    Ok(FetchResult {
        html,
        url: final_url,
        status,
    })
}
