pub mod dates;
pub mod db;
pub mod reports;
pub mod routes;
pub mod startup;
pub mod utils;

pub use dates::*;
pub use db::*;
pub use reports::{DateRange, PrecipitationByDate, RangeError};
pub use routes::*;
pub use startup::*;
pub use utils::*;
