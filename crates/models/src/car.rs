use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const REG_NUMBER_MAX_LEN: usize = 32;
pub const MODEL_MAX_LEN: usize = 100;
pub const OWNER_MAX_LEN: usize = 200;
pub const MIN_RELEASE_YEAR: i32 = 1900;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub reg_number: String,
    pub model: String,
    pub created_at: DateTimeWithTimeZone,
    pub mileage: Option<i32>,
    pub release_year: Option<i32>,
    pub owner: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

fn check_not_blank(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

pub fn validate_reg_number(reg: &str) -> Result<(), ModelError> {
    check_not_blank("regNumber", reg)?;
    check_len("regNumber", reg, REG_NUMBER_MAX_LEN)
}

pub fn validate_model(model: &str) -> Result<(), ModelError> {
    check_not_blank("model", model)?;
    check_len("model", model, MODEL_MAX_LEN)
}

pub fn validate_owner(owner: &str) -> Result<(), ModelError> {
    check_len("owner", owner, OWNER_MAX_LEN)
}

pub fn validate_mileage(mileage: i32) -> Result<(), ModelError> {
    if mileage < 0 {
        return Err(ModelError::Validation("mileage must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_release_year(year: i32) -> Result<(), ModelError> {
    if year < MIN_RELEASE_YEAR {
        return Err(ModelError::Validation(format!("releaseYear must be >= {MIN_RELEASE_YEAR}")));
    }
    Ok(())
}
