//! Request bodies for the conversion endpoints

mod json;
mod http_url;

pub use self::json::ValidJson;
pub use self::http_url::{HttpUrl, InvalidUrl};

use serde::Deserialize;
use utoipa::ToSchema;

/// Body of `POST /convert/url`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UrlConversionRequest {
    /// Absolute http(s) URL of the page to render
    #[schema(value_type = String, example = "https://example.com")]
    pub url: HttpUrl,
}

/// Body of `POST /convert/html`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct HtmlConversionRequest {
    /// Markup to render
    #[schema(example = "<html><body><h1>Hello World</h1></body></html>")]
    pub html: String,
}
