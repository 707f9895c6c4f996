use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr, Unchanged,
};

use models::car::{self, Entity as CarEntity};

use crate::car::domain::Car;
use crate::car::repository::CarRepository;
use crate::errors::ServiceError;

pub struct SeaOrmCarRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Unique index hits become `Conflict`; an update that matched no row becomes `NotFound`.
fn map_db_err(e: DbErr) -> ServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
        return ServiceError::reg_number_taken();
    }
    match e {
        DbErr::RecordNotUpdated => ServiceError::not_found("Car"),
        other => ServiceError::Db(other.to_string()),
    }
}

#[async_trait::async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn exists_by_reg_number(&self, reg_number: &str) -> Result<bool, ServiceError> {
        let n = CarEntity::find()
            .filter(car::Column::RegNumber.eq(reg_number))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(n > 0)
    }

    async fn find_by_reg_number(&self, reg_number: &str) -> Result<Option<car::Model>, ServiceError> {
        CarEntity::find()
            .filter(car::Column::RegNumber.eq(reg_number))
            .one(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<car::Model>, ServiceError> {
        CarEntity::find_by_id(id).one(&self.db).await.map_err(map_db_err)
    }

    async fn find_all_sorted_by_id_desc(&self) -> Result<Vec<car::Model>, ServiceError> {
        CarEntity::find()
            .order_by_desc(car::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn save(&self, c: Car) -> Result<car::Model, ServiceError> {
        let saved = match c.id {
            None => {
                let now: DateTime<FixedOffset> = Utc::now().into();
                car::ActiveModel {
                    id: NotSet,
                    reg_number: Set(c.reg_number),
                    model: Set(c.model),
                    created_at: Set(c.created_at.unwrap_or(now)),
                    mileage: Set(c.mileage),
                    release_year: Set(c.release_year),
                    owner: Set(c.owner),
                }
                .insert(&self.db)
                .await
            }
            Some(id) => {
                car::ActiveModel {
                    id: Unchanged(id),
                    reg_number: Set(c.reg_number),
                    model: Set(c.model),
                    created_at: NotSet,
                    mileage: Set(c.mileage),
                    release_year: Set(c.release_year),
                    owner: Set(c.owner),
                }
                .update(&self.db)
                .await
            }
        };
        saved.map_err(map_db_err)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = CarEntity::find_by_id(id).count(&self.db).await.map_err(map_db_err)?;
        Ok(n > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        CarEntity::delete_by_id(id).exec(&self.db).await.map_err(map_db_err)?;
        Ok(())
    }
}
