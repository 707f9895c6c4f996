use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use models::car as car_model;

use crate::errors::ServiceError;

/// Creation input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarInput {
    pub reg_number: String,
    pub model: String,
    #[serde(default)]
    pub mileage: Option<i32>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl CreateCarInput {
    /// Shape checks run by the transport before the service is called.
    pub fn validate(&self) -> Result<(), ServiceError> {
        car_model::validate_reg_number(&self.reg_number)?;
        car_model::validate_model(&self.model)?;
        validate_optional(self.mileage, self.release_year, self.owner.as_deref())
    }
}

/// Partial update input; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarInput {
    #[serde(default)]
    pub reg_number: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mileage: Option<i32>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl UpdateCarInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(reg) = &self.reg_number { car_model::validate_reg_number(reg)?; }
        if let Some(m) = &self.model { car_model::validate_model(m)?; }
        validate_optional(self.mileage, self.release_year, self.owner.as_deref())
    }
}

fn validate_optional(mileage: Option<i32>, release_year: Option<i32>, owner: Option<&str>) -> Result<(), ServiceError> {
    if let Some(m) = mileage { car_model::validate_mileage(m)?; }
    if let Some(y) = release_year { car_model::validate_release_year(y)?; }
    if let Some(o) = owner { car_model::validate_owner(o)?; }
    Ok(())
}

/// A car as handed to the store: `id == None` means not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: Option<i64>,
    pub reg_number: String,
    pub model: String,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub mileage: Option<i32>,
    pub release_year: Option<i32>,
    pub owner: Option<String>,
}

impl Car {
    /// Apply every field present in `patch`, keeping the rest.
    /// `id` and `created_at` are never touched.
    pub fn merged_with(self, patch: &UpdateCarInput) -> Self {
        Self {
            id: self.id,
            created_at: self.created_at,
            reg_number: patch.reg_number.clone().unwrap_or(self.reg_number),
            model: patch.model.clone().unwrap_or(self.model),
            mileage: patch.mileage.or(self.mileage),
            release_year: patch.release_year.or(self.release_year),
            owner: patch.owner.clone().or(self.owner),
        }
    }
}

impl From<CreateCarInput> for Car {
    fn from(input: CreateCarInput) -> Self {
        Self {
            id: None,
            reg_number: input.reg_number,
            model: input.model,
            created_at: None,
            mileage: input.mileage,
            release_year: input.release_year,
            owner: input.owner,
        }
    }
}

impl From<car_model::Model> for Car {
    fn from(m: car_model::Model) -> Self {
        Self {
            id: Some(m.id),
            reg_number: m.reg_number,
            model: m.model,
            created_at: Some(m.created_at),
            mileage: m.mileage,
            release_year: m.release_year,
            owner: m.owner,
        }
    }
}

/// Response shape returned for every successful read or write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: i64,
    pub reg_number: String,
    pub model: String,
    pub created_at: DateTime<FixedOffset>,
    pub mileage: Option<i32>,
    pub release_year: Option<i32>,
    pub owner: Option<String>,
}

impl From<car_model::Model> for CarResponse {
    fn from(m: car_model::Model) -> Self {
        Self {
            id: m.id,
            reg_number: m.reg_number,
            model: m.model,
            created_at: m.created_at,
            mileage: m.mileage,
            release_year: m.release_year,
            owner: m.owner,
        }
    }
}
