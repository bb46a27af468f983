use std::collections::BTreeMap;

use itertools::Itertools;
use log::{debug, warn};
use time::Date;

use crate::{
    db::{self, ClimateData, PrecipitationRow, TemperatureSummary},
    one_year_before, parse_iso_date, ISO_DATE_HINT,
};

/// Date -> every precipitation reading recorded on that date, across stations
pub type PrecipitationByDate = BTreeMap<String, Vec<Option<f64>>>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to load climate data: {0}")]
    Data(#[from] db::Error),
    #[error("Station {station} has an unreadable date `{date}`")]
    InvalidStoredDate { station: String, date: String },
}

/// Request dates the caller needs to correct; the messages are returned to them as-is
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("The entered date ({start}) does not match the format '{hint}'", hint = ISO_DATE_HINT)]
    MalformedStart { start: String },
    #[error(
        "Either the start ({start}) or stop ({end}) dates do not match the format '{hint}'",
        hint = ISO_DATE_HINT
    )]
    MalformedRange { start: String, end: String },
    #[error("Please enter the earlier date ({end}) ahead of the later date ({start}).")]
    Inverted { start: String, end: String },
}

/// Validated summary filter: `start` inclusive, optional inclusive `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn starting(start: &str) -> Result<Self, RangeError> {
        let parsed = parse_iso_date(start).ok_or_else(|| RangeError::MalformedStart {
            start: start.to_owned(),
        })?;
        Ok(Self {
            start: parsed,
            end: None,
        })
    }

    pub fn between(start: &str, end: &str) -> Result<Self, RangeError> {
        let malformed = || RangeError::MalformedRange {
            start: start.to_owned(),
            end: end.to_owned(),
        };
        let first = parse_iso_date(start).ok_or_else(malformed)?;
        let last = parse_iso_date(end).ok_or_else(malformed)?;

        if first > last {
            return Err(RangeError::Inverted {
                start: start.to_owned(),
                end: end.to_owned(),
            });
        }
        Ok(Self {
            start: first,
            end: Some(last),
        })
    }
}

pub fn group_precipitation(rows: Vec<PrecipitationRow>) -> PrecipitationByDate {
    rows.into_iter()
        .map(|row| (row.date, row.prcp))
        .into_group_map()
        .into_iter()
        .collect()
}

pub async fn precipitation(db: &dyn ClimateData) -> Result<PrecipitationByDate, Error> {
    let rows = db.all_precipitation().await?;
    debug!("grouping {} precipitation readings", rows.len());
    Ok(group_precipitation(rows))
}

pub async fn stations(db: &dyn ClimateData) -> Result<Vec<String>, Error> {
    Ok(db.station_codes().await?)
}

/// Temperatures of the most active station over the year leading up to its latest measurement.
///
/// Only one reading per date is kept and the list is ordered by date. Without any
/// measurements the list is empty.
pub async fn trailing_year_temperatures(db: &dyn ClimateData) -> Result<Vec<f64>, Error> {
    let Some(station) = db.most_active_station().await? else {
        warn!("no measurements found, returning empty temperature list");
        return Ok(vec![]);
    };

    let latest = db
        .measurements_for_station(&station)
        .await?
        .into_iter()
        .map(|row| row.date)
        .max();
    let Some(latest) = latest else {
        return Ok(vec![]);
    };

    let latest_date = parse_iso_date(&latest).ok_or_else(|| Error::InvalidStoredDate {
        station: station.clone(),
        date: latest.clone(),
    })?;
    let cutoff = one_year_before(latest_date);
    debug!(
        "most active station {} last reported {}, reading from {}",
        station, latest, cutoff
    );

    let temperatures = db
        .daily_temperatures_since(&station, cutoff)
        .await?
        .into_iter()
        .map(|row| row.tobs)
        .collect();
    Ok(temperatures)
}

pub async fn temperature_summary(
    db: &dyn ClimateData,
    range: DateRange,
) -> Result<TemperatureSummary, Error> {
    Ok(db.temperature_summary(range.start, range.end).await?)
}
