use std::ops::RangeInclusive;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, FieldErrors};

/// JSON body extractor whose rejections use the API error format.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                Err(ApiError::bad_request("Expected request with `Content-Type: application/json`"))
            }
            Err(rejection) => Err(ApiError::invalid_json(rejection.body_text())),
        }
    }
}

/// Numeric `:id` path segment.
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("Path id must be an integer"))?;
        if id <= 0 {
            return Err(ApiError::bad_request("Path id must be positive"));
        }
        Ok(Self(id))
    }
}

/// Accumulates field problems so a request reports all of them at once.
///
/// Accessors return a placeholder for invalid fields; callers must call
/// [`FieldCheck::finish`] before using any returned value.
#[derive(Debug, Default)]
pub struct FieldCheck {
    errors: FieldErrors,
}

impl FieldCheck {
    pub fn new() -> Self {
        Self::default()
    }

    fn reject(&mut self, field: &str, reason: impl Into<String>) {
        self.errors.entry(field.to_string()).or_insert_with(|| reason.into());
    }

    /// Required, non-blank string; returned trimmed.
    pub fn text(&mut self, field: &str, value: Option<String>) -> String {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => v,
            Some(_) => {
                self.reject(field, "This field must not be empty");
                String::new()
            }
            None => {
                self.reject(field, "This field is required");
                String::new()
            }
        }
    }

    /// Required, non-empty secret; taken verbatim since whitespace is significant.
    pub fn secret(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.is_empty() => v,
            Some(_) => {
                self.reject(field, "This field must not be empty");
                String::new()
            }
            None => {
                self.reject(field, "This field is required");
                String::new()
            }
        }
    }

    /// Optional string; blank collapses to `None`.
    pub fn optional_text(&mut self, value: Option<String>) -> Option<String> {
        value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    /// Required string shaped like `local@domain`.
    pub fn email(&mut self, field: &str, value: Option<String>) -> String {
        let email = self.text(field, value);
        if email.is_empty() {
            return email;
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => email,
            _ => {
                self.reject(field, "Invalid email format");
                email
            }
        }
    }

    /// Required integer within `range`.
    pub fn integer(&mut self, field: &str, value: Option<i64>, range: RangeInclusive<i64>) -> i64 {
        match value {
            Some(v) if range.contains(&v) => v,
            Some(_) => {
                self.reject(
                    field,
                    format!("Must be between {} and {}", range.start(), range.end()),
                );
                *range.start()
            }
            None => {
                self.reject(field, "This field is required");
                *range.start()
            }
        }
    }

    /// Required, positive row id.
    pub fn id(&mut self, field: &str, value: Option<i64>) -> i64 {
        self.integer(field, value, 1..=i64::MAX)
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Missing or invalid fields", Some(self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors(check: FieldCheck) -> FieldErrors {
        match check.finish() {
            Err(ApiError::ValidationError {
                field_errors: Some(errors),
                ..
            }) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_fields_pass_and_are_trimmed() {
        let mut check = FieldCheck::new();
        assert_eq!(check.text("nome", Some("  Ana ".to_string())), "Ana");
        assert_eq!(check.email("email", Some("ana@x.com".to_string())), "ana@x.com");
        assert_eq!(check.integer("nota", Some(5), 1..=5), 5);
        assert!(check.finish().is_ok());
    }

    #[test]
    fn every_bad_field_is_reported() {
        let mut check = FieldCheck::new();
        check.text("titulo", None);
        check.text("descricao", Some("   ".to_string()));
        check.id("categoria_id", Some(0));
        let errors = field_errors(check);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors["titulo"], "This field is required");
        assert_eq!(errors["descricao"], "This field must not be empty");
        assert!(errors["categoria_id"].starts_with("Must be between 1"));
    }

    #[test]
    fn rating_outside_star_scale_is_rejected() {
        let mut check = FieldCheck::new();
        check.integer("nota", Some(6), 1..=5);
        assert_eq!(field_errors(check)["nota"], "Must be between 1 and 5");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["ana", "@x.com", "ana@", "a@b@c"] {
            let mut check = FieldCheck::new();
            check.email("email", Some(bad.to_string()));
            assert_eq!(field_errors(check)["email"], "Invalid email format", "{}", bad);
        }
    }

    #[test]
    fn secrets_are_not_trimmed() {
        let mut check = FieldCheck::new();
        assert_eq!(check.secret("senha", Some(" pw1 ".to_string())), " pw1 ");
        check.secret("other", Some(String::new()));
        assert_eq!(field_errors(check)["other"], "This field must not be empty");
    }

    #[test]
    fn optional_text_drops_blank() {
        let mut check = FieldCheck::new();
        assert_eq!(check.optional_text(Some("  ".to_string())), None);
        assert_eq!(check.optional_text(Some(" boa ".to_string())), Some("boa".to_string()));
        assert!(check.finish().is_ok());
    }
}
