//! Create `car` table.
//!
//! `reg_number` carries a unique index so duplicate registrations are rejected
//! by the database even when two writers pass the service-level check at once.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Car::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Car::RegNumber, 32).not_null())
                    .col(string_len(Car::Model, 100).not_null())
                    .col(timestamp_with_time_zone(Car::CreatedAt).not_null())
                    .col(integer_null(Car::Mileage))
                    .col(integer_null(Car::ReleaseYear))
                    .col(string_len_null(Car::Owner, 200))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_car_reg_number_unique")
                    .table(Car::Table)
                    .col(Car::RegNumber)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Car::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Car {
    Table,
    Id,
    RegNumber,
    Model,
    CreatedAt,
    Mileage,
    ReleaseYear,
    Owner,
}
