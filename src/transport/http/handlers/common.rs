use crate::transport::http::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::Json;

/// Listing ids travel as path segments; anything that is not an integer is rejected.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

pub fn json_body<T>(request: Result<Json<T>, JsonRejection>, expected: &str) -> Result<T, ApiError> {
    match request {
        Ok(Json(body)) => Ok(body),
        Err(e) => Err(ApiError::InvalidBody(format!(
            "{} (expected: {})",
            e.body_text(),
            expected
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("4x"), Err(ApiError::InvalidId(ref s)) if s == "4x"));
        assert!(parse_id("").is_err());
    }
}
