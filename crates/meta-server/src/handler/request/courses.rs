//! Course authoring payloads.

use bigdecimal::{BigDecimal, Zero};
use meta_postgres::model::{NewCourse, UpdateCourse};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::double_option;

fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if price < &BigDecimal::zero() {
        let error = ValidationError::new("price_negative")
            .with_message("Course price cannot be negative".into());
        return Err(error);
    }

    Ok(())
}

/// Payload for `POST /api/admin/courses`.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub instructor: Option<String>,
    #[validate(range(min = 1))]
    pub duration_hours: Option<i32>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<BigDecimal>,
}

impl CreateCourseRequest {
    pub fn into_model(self) -> NewCourse {
        NewCourse {
            title: self.title,
            description: self.description,
            instructor: self.instructor,
            duration_hours: self.duration_hours,
            price: self.price,
        }
    }
}

/// Payload for `PUT /api/admin/courses/{courseId}`.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 5000))]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 200))]
    pub instructor: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(range(min = 1))]
    pub duration_hours: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Option<BigDecimal>>,
}

impl UpdateCourseRequest {
    /// Returns whether the payload changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.instructor.is_none()
            && self.duration_hours.is_none()
            && self.price.is_none()
    }

    pub fn into_model(self) -> UpdateCourse {
        UpdateCourse {
            title: self.title,
            description: self.description,
            instructor: self.instructor,
            duration_hours: self.duration_hours,
            price: self.price,
            ..UpdateCourse::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_price_and_zero_duration() -> anyhow::Result<()> {
        let request: CreateCourseRequest = serde_json::from_str(
            r#"{"title":"Rust","price":"-1.00","durationHours":0}"#,
        )?;
        let errors = request.validate().expect_err("invalid course");
        let fields = errors.field_errors();

        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("duration_hours"));
        Ok(())
    }

    #[test]
    fn update_treats_null_as_clear() -> anyhow::Result<()> {
        let request: UpdateCourseRequest = serde_json::from_str(r#"{"price":null}"#)?;
        assert!(!request.is_empty());
        assert!(request.validate().is_ok());
        assert_eq!(request.into_model().price, Some(None));
        Ok(())
    }
}
