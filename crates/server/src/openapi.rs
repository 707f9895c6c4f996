use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc {
    #[schema(example = "Not Found")]
    pub error: String,
    #[schema(example = "Car not found")]
    pub message: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequestDoc {
    /// Non-blank, at most 32 characters, unique.
    #[schema(example = "A123BC")]
    pub reg_number: String,
    /// Non-blank, at most 100 characters.
    #[schema(example = "Civic")]
    pub model: String,
    /// At least 0.
    pub mileage: Option<i32>,
    /// At least 1900.
    pub release_year: Option<i32>,
    /// At most 200 characters.
    pub owner: Option<String>,
}

/// Every field optional; omitted or null fields are left unchanged.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequestDoc {
    pub reg_number: Option<String>,
    pub model: Option<String>,
    pub mileage: Option<i32>,
    pub release_year: Option<i32>,
    pub owner: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarResponseDoc {
    #[schema(example = 10)]
    pub id: i64,
    pub reg_number: String,
    pub model: String,
    #[schema(example = "2024-01-01T10:00:00Z")]
    pub created_at: String,
    pub mileage: Option<i32>,
    pub release_year: Option<i32>,
    pub owner: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cars::list,
        crate::routes::cars::create,
        crate::routes::cars::get,
        crate::routes::cars::get_by_reg_number,
        crate::routes::cars::update,
        crate::routes::cars::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            CreateCarRequestDoc,
            UpdateCarRequestDoc,
            CarResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cars")
    )
)]
pub struct ApiDoc;
