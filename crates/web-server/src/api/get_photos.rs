use actix_web::{web, HttpRequest, HttpResponse};
use carousel_web_core::{
    ErrorDesc, Photo, PhotoApiResponse, ALBUM_ID_PARAM, LIMIT_PARAM, OFFSET_PARAM,
};

use crate::non_empty::NonEmpty;
use crate::params::{QueryValue, ValidatedRequestParams};
use crate::upstream::{self, InvalidPhotoResponse};

#[derive(Debug, super::Error, thiserror::Error)]
pub enum Error {
    #[error("Upstream photo request failed")]
    RequestFailed(#[from] upstream::RequestFailed),
    #[error("Upstream photo response is malformed")]
    BadPhotoResponse,
    #[error("Upstream returned no photos")]
    NoPhotosFound,
}

impl From<InvalidPhotoResponse> for Error {
    fn from(error: InvalidPhotoResponse) -> Self {
        match error {
            InvalidPhotoResponse::BadPhotoResponse => Self::BadPhotoResponse,
            InvalidPhotoResponse::NoPhotosFound => Self::NoPhotosFound,
        }
    }
}

async fn fetch_photos(
    client: &upstream::Client,
    params: &ValidatedRequestParams,
) -> Result<NonEmpty<Photo>, Error> {
    let url = client.photos_url(params.album_ids.as_deref());
    log::debug!("  UPSTREAM URL {}", url);

    let json = client.fetch(&url).await?;
    Ok(upstream::validate_response(json)?)
}

fn page(photos: NonEmpty<Photo>, offset: usize, limit: usize) -> Vec<Photo> {
    photos.into_iter().skip(offset).take(limit).collect()
}

pub async fn endpoint(
    req: HttpRequest,
    client: web::Data<upstream::Client>,
) -> Result<HttpResponse, Error> {
    let album_ids = QueryValue::extract(req.query_string(), ALBUM_ID_PARAM);
    let offset = QueryValue::extract(req.query_string(), OFFSET_PARAM);
    let limit = QueryValue::extract(req.query_string(), LIMIT_PARAM);

    let params = match crate::params::validate(&album_ids, &offset, &limit) {
        Ok(params) => params,
        Err(validation_errors) => {
            log::debug!("GET /photos rejected {:?}", req.query_string());
            return Ok(HttpResponse::BadRequest()
                .json(PhotoApiResponse::validation_errors(validation_errors)));
        }
    };

    log::debug!("GET /photos {}", params);

    let photos = fetch_photos(&client, &params).await.map_err(|err| {
        log::error!(
            "Request with {} resulted in an error: {} {}",
            params,
            err.kind_name(),
            serde_json::to_string(&ErrorDesc::from(&err as &dyn std::error::Error))
                .unwrap_or_default()
        );
        err
    })?;

    Ok(HttpResponse::Ok().json(PhotoApiResponse::photos(page(
        photos,
        params.offset,
        params.limit,
    ))))
}
