//! Course catalog models.

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::courses;

/// A course in the public catalog.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
    /// Expected workload in hours.
    pub duration_hours: Option<i32>,
    /// Price with two decimal places.
    pub price: Option<BigDecimal>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for creating a new course.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration_hours: Option<i32>,
    pub price: Option<BigDecimal>,
}

/// Data for updating a course.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub instructor: Option<Option<String>>,
    pub duration_hours: Option<Option<i32>>,
    pub price: Option<Option<BigDecimal>>,
    pub updated_at: Option<Timestamp>,
}
