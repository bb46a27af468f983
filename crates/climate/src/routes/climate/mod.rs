pub mod climate_routes;
pub mod summary_routes;

pub use climate_routes::*;
pub use summary_routes::*;
