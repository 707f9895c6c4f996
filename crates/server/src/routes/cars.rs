use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use service::car::domain::{CarResponse, CreateCarInput, UpdateCarInput};

use crate::{errors::JsonApiError, routes::ServerState};

#[utoipa::path(
    get, path = "/api/cars", tag = "cars",
    responses(
        (status = 200, description = "All cars, newest id first", body = [crate::openapi::CarResponseDoc]),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CarResponse>>, JsonApiError> {
    let cars = state.cars.list().await?;
    info!(count = cars.len(), "list cars");
    Ok(Json(cars))
}

#[utoipa::path(
    post, path = "/api/cars", tag = "cars",
    request_body = crate::openapi::CreateCarRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CarResponseDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "regNumber already registered", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateCarInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CarResponse>), JsonApiError> {
    let Json(input) = payload?;
    input.validate()?;
    info!(reg_number = %input.reg_number, model = %input.model, "car_create_request");
    let car = state.cars.create(input).await?;
    info!(id = car.id, reg_number = %car.reg_number, "created car");
    Ok((StatusCode::CREATED, Json(car)))
}

#[utoipa::path(
    get, path = "/api/cars/{id}", tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CarResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<CarResponse>, JsonApiError> {
    Ok(Json(state.cars.get(id).await?))
}

#[utoipa::path(
    get, path = "/api/cars/reg/{reg_number}", tag = "cars",
    params(("reg_number" = String, Path, description = "Registration number")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CarResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get_by_reg_number(
    State(state): State<ServerState>,
    Path(reg_number): Path<String>,
) -> Result<Json<CarResponse>, JsonApiError> {
    Ok(Json(state.cars.get_by_reg_number(&reg_number).await?))
}

/// Serves both PUT and PATCH; fields left out of the body keep their value.
#[utoipa::path(
    put, path = "/api/cars/{id}", tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    request_body = crate::openapi::UpdateCarRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CarResponseDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "regNumber already registered", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateCarInput>, JsonRejection>,
) -> Result<Json<CarResponse>, JsonApiError> {
    let Json(input) = payload?;
    input.validate()?;
    let car = state.cars.update(id, input).await?;
    info!(id = car.id, "updated car");
    Ok(Json(car))
}

#[utoipa::path(
    delete, path = "/api/cars/{id}", tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    state.cars.delete(id).await?;
    info!(id, "deleted car");
    Ok(StatusCode::NO_CONTENT)
}
