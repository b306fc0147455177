pub const ALBUM_ID_PARAM: &'static str = "albumId";
pub const OFFSET_PARAM: &'static str = "offset";
pub const LIMIT_PARAM: &'static str = "limit";

pub const MAX_PHOTOS_LIMIT: usize = 100;
pub const DEFAULT_PHOTOS_LIMIT: usize = 25;
pub const DEFAULT_OFFSET: usize = 0;

#[derive(serde::Serialize)]
pub struct ErrorDesc {
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<Box<ErrorDesc>>,
}

impl From<&dyn std::error::Error> for ErrorDesc {
    fn from(error: &dyn std::error::Error) -> Self {
        Self {
            description: format!("{}", error),
            cause: error
                .source()
                .map(|source| Box::new(ErrorDesc::from(source))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub album_id: u64,
    pub id: u64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

/// The form field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum ElementId {
    #[serde(rename = "albumId")]
    AlbumId,
    #[serde(rename = "offset")]
    Offset,
    #[serde(rename = "limit")]
    Limit,
}

impl ElementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlbumId => ALBUM_ID_PARAM,
            Self::Offset => OFFSET_PARAM,
            Self::Limit => LIMIT_PARAM,
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub message: String,
    pub element_id: ElementId,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, element_id: ElementId) -> Self {
        Self {
            message: message.into(),
            element_id,
        }
    }
}

/// Body of every `/api/photos` response. Exactly one field is set.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<Photo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<ValidationError>>,
}

impl PhotoApiResponse {
    pub fn photos<I>(photos: I) -> Self
    where
        I: IntoIterator<Item = Photo>,
    {
        Self {
            photos: Some(photos.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn validation_errors<I>(validation_errors: I) -> Self
    where
        I: IntoIterator<Item = ValidationError>,
    {
        Self {
            validation_errors: Some(validation_errors.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn validation_error_for(&self, element_id: ElementId) -> Option<&ValidationError> {
        self.validation_errors
            .as_ref()
            .and_then(|errors| errors.iter().find(|error| error.element_id == element_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_use_field_names_on_the_wire() {
        let body = PhotoApiResponse::validation_errors(vec![ValidationError::new(
            "bad limit",
            ElementId::Limit,
        )]);

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "validationErrors": [{ "message": "bad limit", "elementId": "limit" }]
            })
        );
    }

    #[test]
    fn photos_use_camel_case_keys() {
        let photo: Photo = serde_json::from_value(serde_json::json!({
            "albumId": 1,
            "id": 2,
            "title": "title",
            "url": "https://via.placeholder.com/600/92c952",
            "thumbnailUrl": "https://via.placeholder.com/150/92c952"
        }))
        .unwrap();

        assert_eq!(photo.album_id, 1);
        assert_eq!(photo.thumbnail_url, "https://via.placeholder.com/150/92c952");
    }

    #[test]
    fn finds_validation_error_by_element() {
        let body = PhotoApiResponse::validation_errors(vec![
            ValidationError::new("bad album", ElementId::AlbumId),
            ValidationError::new("bad offset", ElementId::Offset),
        ]);

        assert_eq!(
            body.validation_error_for(ElementId::Offset)
                .map(|error| error.message.as_str()),
            Some("bad offset")
        );
        assert!(body.validation_error_for(ElementId::Limit).is_none());
    }

    #[test]
    fn error_desc_walks_sources() {
        #[derive(Debug)]
        struct Inner;
        impl std::fmt::Display for Inner {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("inner")
            }
        }
        impl std::error::Error for Inner {}

        #[derive(Debug)]
        struct Outer(Inner);
        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("outer")
            }
        }
        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let outer = Outer(Inner);
        assert_eq!(
            serde_json::to_value(ErrorDesc::from(&outer as &dyn std::error::Error)).unwrap(),
            serde_json::json!({ "description": "outer", "cause": { "description": "inner" } })
        );
    }
}
