pub mod aggregate;
pub mod explorer;
pub mod filters;
pub mod loader;
pub mod stats;
pub mod viewer;

pub use crate::domain::model::{SessionFilters, Trip, TripRecord, TripTable};
pub use crate::domain::ports::{ConfigProvider, Console, DatasetSource};
pub use crate::utils::error::Result;
