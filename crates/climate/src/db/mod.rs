pub mod climate_data;
pub mod schema;

pub use climate_data::*;
pub use schema::{TableShape, MEASUREMENT_TABLE, STATION_TABLE};
