use carousel_web_core::{Photo, ALBUM_ID_PARAM};

use crate::non_empty::NonEmpty;

pub const DEFAULT_PHOTO_URL: &'static str = "https://jsonplaceholder.typicode.com/photos";

/// Why an upstream request produced no JSON.
#[derive(Debug, thiserror::Error)]
pub enum RequestFailure {
    /// Non-2xx status. The text is the code's canonical reason, not the
    /// phrase the upstream sent.
    #[error("HTTP {} {}", .0.as_u16(), .0.canonical_reason().unwrap_or("Unknown"))]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Transport(reqwest::Error),
    #[error(transparent)]
    Decode(serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("Request to {url} failed")]
pub struct RequestFailed {
    pub url: url::Url,
    #[source]
    pub cause: RequestFailure,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InvalidPhotoResponse {
    #[error("Photo response does not have the expected shape")]
    BadPhotoResponse,
    #[error("No photos found")]
    NoPhotosFound,
}

/// Appends one `albumId` parameter per non-blank album id to `base_url`.
pub fn build_url(base_url: &url::Url, album_ids: Option<&[String]>) -> url::Url {
    let album_ids: Vec<&str> = album_ids
        .unwrap_or_default()
        .iter()
        .map(|album_id| album_id.trim())
        .filter(|album_id| !album_id.is_empty())
        .collect();

    let mut url = base_url.clone();
    if !album_ids.is_empty() {
        url.query_pairs_mut().extend_pairs(
            album_ids
                .into_iter()
                .map(|album_id| (ALBUM_ID_PARAM, album_id)),
        );
    }
    url
}

fn take_string(
    object: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<String> {
    match object.remove(key)? {
        serde_json::Value::String(value) => Some(value),
        _ => None,
    }
}

fn photo_from_value(value: serde_json::Value) -> Option<Photo> {
    let mut object = match value {
        serde_json::Value::Object(object) => object,
        _ => return None,
    };

    Some(Photo {
        album_id: object.get("albumId")?.as_u64()?,
        id: object.get("id")?.as_u64()?,
        title: take_string(&mut object, "title")?,
        url: take_string(&mut object, "url")?,
        thumbnail_url: take_string(&mut object, "thumbnailUrl")?,
    })
}

/// Checks that `json` is a non-empty array of photos. Unknown keys on a
/// photo are ignored.
pub fn validate_response(
    json: serde_json::Value,
) -> Result<NonEmpty<Photo>, InvalidPhotoResponse> {
    let items = match json {
        serde_json::Value::Array(items) => items,
        _ => return Err(InvalidPhotoResponse::BadPhotoResponse),
    };

    let photos = items
        .into_iter()
        .map(photo_from_value)
        .collect::<Option<Vec<_>>>()
        .ok_or(InvalidPhotoResponse::BadPhotoResponse)?;

    NonEmpty::from_vec(photos).ok_or(InvalidPhotoResponse::NoPhotosFound)
}

pub struct Client {
    http_client: reqwest::Client,
    photo_url: url::Url,
    revalidate: std::time::Duration,
}

impl Client {
    pub fn new(
        http_client: reqwest::Client,
        photo_url: url::Url,
        revalidate: std::time::Duration,
    ) -> Self {
        Self {
            http_client,
            photo_url,
            revalidate,
        }
    }

    pub fn photos_url(&self, album_ids: Option<&[String]>) -> url::Url {
        build_url(&self.photo_url, album_ids)
    }

    pub async fn fetch(&self, url: &url::Url) -> Result<serde_json::Value, RequestFailed> {
        self.fetch_json(url).await.map_err(|cause| RequestFailed {
            url: url.clone(),
            cause,
        })
    }

    async fn fetch_json(&self, url: &url::Url) -> Result<serde_json::Value, RequestFailure> {
        let response = self
            .http_client
            .get(url.clone())
            .header(
                reqwest::header::CACHE_CONTROL,
                format!("max-age={}", self.revalidate.as_secs()),
            )
            .send()
            .await
            .map_err(RequestFailure::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestFailure::Status(status));
        }

        let body = response.bytes().await.map_err(RequestFailure::Transport)?;
        serde_json::from_slice(&body).map_err(RequestFailure::Decode)
    }
}
