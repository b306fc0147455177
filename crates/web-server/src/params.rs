use carousel_web_core::{
    ElementId, ValidationError, DEFAULT_OFFSET, DEFAULT_PHOTOS_LIMIT, MAX_PHOTOS_LIMIT,
};

use crate::non_empty::NonEmpty;

/// A query parameter as it arrived: missing, given once or repeated.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Absent,
    Single(String),
    Multiple(Vec<String>),
}

impl QueryValue {
    pub fn extract(query_string: &str, key: &str) -> Self {
        let mut values: Vec<String> = url::form_urlencoded::parse(query_string.as_bytes())
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
            .collect();

        match values.len() {
            0 => Self::Absent,
            1 => Self::Single(values.remove(0)),
            _ => Self::Multiple(values),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequestParams {
    pub album_ids: Option<Vec<String>>,
    pub offset: usize,
    pub limit: usize,
}

impl std::fmt::Display for ValidatedRequestParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.album_ids {
            Some(album_ids) => write!(f, "albumId={}", album_ids.join(","))?,
            None => f.write_str("albumId=none")?,
        }
        write!(f, ", offset={}, limit={}", self.offset, self.limit)
    }
}

fn invalid_album_id() -> ValidationError {
    ValidationError::new(
        "Invalid album id provided. Album id must be a non-negative integer",
        ElementId::AlbumId,
    )
}

fn invalid_offset() -> ValidationError {
    ValidationError::new(
        "Invalid offset provided. Offset must be a non-negative integer",
        ElementId::Offset,
    )
}

fn invalid_limit() -> ValidationError {
    ValidationError::new(
        format!(
            "Invalid limit provided. Limit must be a non-negative integer less than or equal to {} and only one limit is allowed",
            MAX_PHOTOS_LIMIT
        ),
        ElementId::Limit,
    )
}

// Decimal digits only: signs, fractions and exponents are rejected.
fn is_non_negative_integer(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Digits too large for `usize` saturate rather than fail.
fn parse_non_negative(value: &str) -> Option<usize> {
    if is_non_negative_integer(value) {
        Some(value.trim().parse().unwrap_or(usize::MAX))
    } else {
        None
    }
}

fn validate_album_ids(raw: &QueryValue) -> Result<Option<Vec<String>>, ValidationError> {
    let tokens: Vec<&str> = match raw {
        QueryValue::Absent => return Ok(None),
        QueryValue::Single(value) => value.split(',').collect(),
        QueryValue::Multiple(values) => values.iter().map(String::as_str).collect(),
    };

    let tokens: Vec<String> = tokens
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect();

    if !tokens.iter().all(|token| is_non_negative_integer(token)) {
        Err(invalid_album_id())
    } else if tokens.is_empty() {
        Ok(None)
    } else {
        Ok(Some(tokens))
    }
}

fn validate_count(
    raw: &QueryValue,
    default: usize,
    max: Option<usize>,
    invalid: fn() -> ValidationError,
) -> Result<usize, ValidationError> {
    match raw {
        QueryValue::Absent => Ok(default),
        QueryValue::Single(value) if value.trim().is_empty() => Ok(default),
        QueryValue::Single(value) => parse_non_negative(value)
            .filter(|count| max.map_or(true, |max| *count <= max))
            .ok_or_else(invalid),
        QueryValue::Multiple(_) => Err(invalid()),
    }
}

/// Validates every field independently, reporting at most one error per field
/// in the order album id, offset, limit.
pub fn validate(
    album_ids: &QueryValue,
    offset: &QueryValue,
    limit: &QueryValue,
) -> Result<ValidatedRequestParams, NonEmpty<ValidationError>> {
    let mut errors = Vec::new();

    let album_ids = validate_album_ids(album_ids).unwrap_or_else(|error| {
        errors.push(error);
        None
    });
    let offset = validate_count(offset, DEFAULT_OFFSET, None, invalid_offset).unwrap_or_else(
        |error| {
            errors.push(error);
            DEFAULT_OFFSET
        },
    );
    let limit = validate_count(
        limit,
        DEFAULT_PHOTOS_LIMIT,
        Some(MAX_PHOTOS_LIMIT),
        invalid_limit,
    )
    .unwrap_or_else(|error| {
        errors.push(error);
        DEFAULT_PHOTOS_LIMIT
    });

    match NonEmpty::from_vec(errors) {
        Some(errors) => Err(errors),
        None => Ok(ValidatedRequestParams {
            album_ids,
            offset,
            limit,
        }),
    }
}
