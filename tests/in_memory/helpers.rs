//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskflow::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Task, TaskDraft, UserId},
    services::{TaskLifecycleResult, TaskLifecycleService},
};

/// Service type used across in-memory integration tests.
pub type TestService = TaskLifecycleService<InMemoryTaskStore, DefaultClock>;

/// Provides a fresh store shared by the service and the board.
#[fixture]
pub fn store() -> Arc<InMemoryTaskStore> {
    Arc::new(InMemoryTaskStore::new())
}

/// Provides a lifecycle service over a fresh store.
#[fixture]
pub fn service(store: Arc<InMemoryTaskStore>) -> TestService {
    service_over(store)
}

/// Builds a lifecycle service over an existing store.
pub fn service_over(store: Arc<InMemoryTaskStore>) -> TestService {
    TaskLifecycleService::new(store, Arc::new(DefaultClock))
}

/// Provides the primary test user.
#[fixture]
pub fn alice() -> UserId {
    UserId::new("alice").expect("valid user id")
}

/// Creates one task per title, in order.
///
/// # Errors
///
/// Returns the first creation failure.
pub async fn seed(
    service: &TestService,
    user: &UserId,
    titles: &[&str],
) -> TaskLifecycleResult<Vec<Task>> {
    let mut created = Vec::with_capacity(titles.len());
    for title in titles {
        created.push(service.create(user, TaskDraft::new(*title)).await?);
    }
    Ok(created)
}
