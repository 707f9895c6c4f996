use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Car, CarResponse, CreateCarInput, UpdateCarInput};
use super::repository::CarRepository;
use crate::errors::ServiceError;

const ENTITY: &str = "Car";

/// Car registry business service, independent of the web framework.
///
/// Enforces registration-number uniqueness before writes and turns missing ids
/// into `ServiceError::NotFound`. Inputs are expected to be validated already.
pub struct CarService {
    repo: Arc<dyn CarRepository>,
}

impl CarService {
    pub fn new(repo: Arc<dyn CarRepository>) -> Self { Self { repo } }

    /// Register a new car.
    ///
    /// # Examples
    /// ```
    /// use service::car::{CarService, domain::CreateCarInput, repository::memory::InMemoryCarRepository};
    /// use std::sync::Arc;
    /// let svc = CarService::new(Arc::new(InMemoryCarRepository::new()));
    /// let input = CreateCarInput { reg_number: "A123BC".into(), model: "Civic".into(), mileage: Some(120000), release_year: Some(2012), owner: Some("Alex".into()) };
    /// let car = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(car.reg_number, "A123BC");
    /// assert_eq!(car.id, 1);
    /// ```
    #[instrument(skip(self, input), fields(reg_number = %input.reg_number))]
    pub async fn create(&self, input: CreateCarInput) -> Result<CarResponse, ServiceError> {
        if self.repo.exists_by_reg_number(&input.reg_number).await? {
            debug!("reg_number already registered");
            return Err(ServiceError::reg_number_taken());
        }
        let saved = self.repo.save(Car::from(input)).await?;
        info!(id = saved.id, "car_created");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<CarResponse, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(CarResponse::from)
            .ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    #[instrument(skip(self))]
    pub async fn get_by_reg_number(&self, reg_number: &str) -> Result<CarResponse, ServiceError> {
        self.repo
            .find_by_reg_number(reg_number)
            .await?
            .map(CarResponse::from)
            .ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    /// All cars, newest id first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CarResponse>, ServiceError> {
        let rows = self.repo.find_all_sorted_by_id_desc().await?;
        Ok(rows.into_iter().map(CarResponse::from).collect())
    }

    /// Apply the fields present in `input`; absent fields keep their value.
    ///
    /// A `reg_number` equal to the current one skips the uniqueness lookup.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: UpdateCarInput) -> Result<CarResponse, ServiceError> {
        let current = self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;

        if let Some(reg) = input.reg_number.as_deref() {
            if reg != current.reg_number && self.repo.exists_by_reg_number(reg).await? {
                debug!(reg_number = %reg, "reg_number already registered");
                return Err(ServiceError::reg_number_taken());
            }
        }

        let saved = self.repo.save(Car::from(current).merged_with(&input)).await?;
        info!(id = saved.id, "car_updated");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found(ENTITY));
        }
        self.repo.delete_by_id(id).await?;
        info!(id, "car_deleted");
        Ok(())
    }
}
