pub mod coordinator_service;

pub use coordinator_service::{CoordinatorService, CoordinatorSnapshot};
