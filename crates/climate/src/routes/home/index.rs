/// Plain text listing served at `/`
pub const ROUTE_LISTING: &str = "Available Routes:
/api/v1.0/precipitation
/api/v1.0/stations
/api/v1.0/tobs
/api/v1.0/<start_date>
/api/v1.0/<start_date>/<end_date>
";

pub async fn index_handler() -> &'static str {
    ROUTE_LISTING
}
