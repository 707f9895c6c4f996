use async_trait::async_trait;

use models::car::Model;

use super::domain::Car;
use crate::errors::ServiceError;

/// Repository abstraction over the `car` table.
///
/// `save` inserts when `car.id` is `None` (assigning the id, and `created_at`
/// when absent) and otherwise updates the row in place without touching
/// `created_at`.
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn exists_by_reg_number(&self, reg_number: &str) -> Result<bool, ServiceError>;
    async fn find_by_reg_number(&self, reg_number: &str) -> Result<Option<Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Model>, ServiceError>;
    async fn find_all_sorted_by_id_desc(&self) -> Result<Vec<Model>, ServiceError>;
    async fn save(&self, car: Car) -> Result<Model, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
}

/// In-memory repository for tests, doc examples and running without a database.
pub mod memory {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// How many times each repository operation has been invoked.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct CallCounts {
        pub exists_by_reg_number: usize,
        pub find_by_reg_number: usize,
        pub find_by_id: usize,
        pub find_all: usize,
        pub save: usize,
        pub exists_by_id: usize,
        pub delete_by_id: usize,
    }

    struct Inner {
        rows: BTreeMap<i64, Model>,
        next_id: i64,
        calls: CallCounts,
    }

    pub struct InMemoryCarRepository {
        inner: Mutex<Inner>,
        fixed_now: Option<DateTime<FixedOffset>>,
    }

    impl Default for InMemoryCarRepository {
        fn default() -> Self { Self::new() }
    }

    impl InMemoryCarRepository {
        pub fn new() -> Self {
            Self {
                inner: Mutex::new(Inner { rows: BTreeMap::new(), next_id: 1, calls: CallCounts::default() }),
                fixed_now: None,
            }
        }

        /// Ids handed out on insert start at `next_id`.
        pub fn with_next_id(self, next_id: i64) -> Self {
            self.lock().next_id = next_id;
            self
        }

        /// Stamp inserts with `now` instead of the wall clock.
        pub fn with_fixed_now(mut self, now: DateTime<FixedOffset>) -> Self {
            self.fixed_now = Some(now);
            self
        }

        /// Store a row verbatim, bypassing call accounting.
        pub fn seed(&self, row: Model) {
            let mut inner = self.lock();
            inner.next_id = inner.next_id.max(row.id + 1);
            inner.rows.insert(row.id, row);
        }

        pub fn calls(&self) -> CallCounts { self.lock().calls }

        pub fn reset_calls(&self) { self.lock().calls = CallCounts::default(); }

        pub fn len(&self) -> usize { self.lock().rows.len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn lock(&self) -> MutexGuard<'_, Inner> {
            self.inner.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn now(&self) -> DateTime<FixedOffset> {
            self.fixed_now.unwrap_or_else(|| Utc::now().into())
        }
    }

    #[async_trait]
    impl CarRepository for InMemoryCarRepository {
        async fn exists_by_reg_number(&self, reg_number: &str) -> Result<bool, ServiceError> {
            let mut inner = self.lock();
            inner.calls.exists_by_reg_number += 1;
            Ok(inner.rows.values().any(|c| c.reg_number == reg_number))
        }

        async fn find_by_reg_number(&self, reg_number: &str) -> Result<Option<Model>, ServiceError> {
            let mut inner = self.lock();
            inner.calls.find_by_reg_number += 1;
            Ok(inner.rows.values().find(|c| c.reg_number == reg_number).cloned())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Model>, ServiceError> {
            let mut inner = self.lock();
            inner.calls.find_by_id += 1;
            Ok(inner.rows.get(&id).cloned())
        }

        async fn find_all_sorted_by_id_desc(&self) -> Result<Vec<Model>, ServiceError> {
            let mut inner = self.lock();
            inner.calls.find_all += 1;
            Ok(inner.rows.values().rev().cloned().collect())
        }

        async fn save(&self, car: Car) -> Result<Model, ServiceError> {
            let now = self.now();
            let mut inner = self.lock();
            inner.calls.save += 1;

            // same guarantee the unique index gives the SQL store
            let clash = inner
                .rows
                .values()
                .any(|c| c.reg_number == car.reg_number && Some(c.id) != car.id);
            if clash {
                return Err(ServiceError::reg_number_taken());
            }

            let row = match car.id {
                None => {
                    let id = inner.next_id;
                    inner.next_id += 1;
                    Model {
                        id,
                        reg_number: car.reg_number,
                        model: car.model,
                        created_at: car.created_at.unwrap_or(now),
                        mileage: car.mileage,
                        release_year: car.release_year,
                        owner: car.owner,
                    }
                }
                Some(id) => {
                    let existing = inner.rows.get(&id).ok_or_else(|| ServiceError::not_found("Car"))?;
                    Model {
                        id,
                        reg_number: car.reg_number,
                        model: car.model,
                        created_at: existing.created_at,
                        mileage: car.mileage,
                        release_year: car.release_year,
                        owner: car.owner,
                    }
                }
            };
            inner.rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            let mut inner = self.lock();
            inner.calls.exists_by_id += 1;
            Ok(inner.rows.contains_key(&id))
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            let mut inner = self.lock();
            inner.calls.delete_by_id += 1;
            inner.rows.remove(&id);
            Ok(())
        }
    }

}
