use async_trait::async_trait;
use log::{debug, info};
use regex::Regex;
use scooby::postgres::{select, Aliasable, Parameters, Select};
use serde::{Deserialize, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteRow},
    Connection, Row, SqliteConnection,
};
use time::Date;

use super::schema::{MEASUREMENT_TABLE, STATION_TABLE, TABLES};
use crate::format_iso_date;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to build query: {0}")]
    Regex(#[from] regex::Error),
    #[error("Failed to format date: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error("Table `{0}` not found in database")]
    MissingTable(String),
    #[error("Table `{table}` has no column `{column}`")]
    MissingColumn { table: String, column: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRow {
    pub date: String,
    pub tobs: f64,
}

/// Minimum, average and maximum temperature over a date filter.
///
/// Every field is `None` when no measurement matched. Serializes as `[min, avg, max]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl Serialize for TemperatureSummary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.min, self.avg, self.max].serialize(serializer)
    }
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Every (date, precipitation) pair, unfiltered
    async fn all_precipitation(&self) -> Result<Vec<PrecipitationRow>, Error>;
    /// Every code in the station table, duplicates included
    async fn station_codes(&self) -> Result<Vec<String>, Error>;
    /// Station with the most measurement rows, `None` when there are no measurements
    async fn most_active_station(&self) -> Result<Option<String>, Error>;
    async fn measurements_for_station(&self, station: &str) -> Result<Vec<TemperatureRow>, Error>;
    /// One row per distinct date on or after `since`, ascending by date
    async fn daily_temperatures_since(
        &self,
        station: &str,
        since: Date,
    ) -> Result<Vec<TemperatureRow>, Error>;
    async fn temperature_summary(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<TemperatureSummary, Error>;
}

pub struct ClimateAccess {
    options: SqliteConnectOptions,
    /// Matches the `$N` placeholders scooby writes, sqlite wants `?`
    placeholder: Regex,
}

impl ClimateAccess {
    pub fn new(database_path: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .read_only(true)
            .create_if_missing(false);
        Ok(Self {
            options,
            placeholder: Regex::new(r"\$(\d+)")?,
        })
    }

    /// Rewrites the built query into sqlite's positional parameter syntax
    pub fn to_sqlite(&self, select: &Select) -> String {
        self.placeholder
            .replace_all(&select.to_string(), "?")
            .into_owned()
    }

    /// Opens a new connection for a single query, nothing is pooled or shared between requests
    pub async fn open_connection(&self) -> Result<SqliteConnection, Error> {
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }

    /// Confirms the station and measurement tables exist with the columns the queries use
    pub async fn verify_schema(&self) -> Result<(), Error> {
        let mut conn = self.open_connection().await?;
        let mut verified = Ok(());
        for table in TABLES {
            verified = table.verify(&mut conn).await;
            if verified.is_err() {
                break;
            }
        }
        let closed = conn.close().await;
        verified?;
        closed?;
        info!("database schema verified");
        Ok(())
    }

    pub async fn query(&self, select: Select, params: Vec<String>) -> Result<Vec<SqliteRow>, Error> {
        let fixed_params = self.to_sqlite(&select);
        debug!("running query: {}", fixed_params);

        let mut conn = self.open_connection().await?;
        let mut query = sqlx::query(&fixed_params);
        for param in params {
            query = query.bind(param);
        }
        let rows = query.fetch_all(&mut conn).await;
        let closed = conn.close().await;
        let rows = rows?;
        closed?;
        Ok(rows)
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn all_precipitation(&self) -> Result<Vec<PrecipitationRow>, Error> {
        let query = select(("date", "prcp")).from(MEASUREMENT_TABLE.name);
        let rows = self.query(query, vec![]).await?;

        rows.iter()
            .map(|row| -> Result<PrecipitationRow, Error> {
                Ok(PrecipitationRow {
                    date: row.try_get("date")?,
                    prcp: row.try_get("prcp")?,
                })
            })
            .collect()
    }

    async fn station_codes(&self) -> Result<Vec<String>, Error> {
        let query = select("station").from(STATION_TABLE.name);
        let rows = self.query(query, vec![]).await?;

        let codes = rows
            .iter()
            .map(|row| row.try_get("station"))
            .collect::<Result<Vec<String>, sqlx::Error>>()?;
        Ok(codes)
    }

    async fn most_active_station(&self) -> Result<Option<String>, Error> {
        let query = select(("station", "COUNT(*)".as_("observations")))
            .from(MEASUREMENT_TABLE.name)
            .group_by("station");
        let rows = self.query(query, vec![]).await?;

        let counts = rows
            .iter()
            .map(|row| -> Result<(String, i64), sqlx::Error> {
                Ok((row.try_get("station")?, row.try_get("observations")?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(busiest(counts))
    }

    async fn measurements_for_station(&self, station: &str) -> Result<Vec<TemperatureRow>, Error> {
        let mut placeholders = Parameters::new();
        let query = select(("date", "tobs"))
            .from(MEASUREMENT_TABLE.name)
            .where_(format!("station = {}", placeholders.next()));
        let rows = self.query(query, vec![station.to_owned()]).await?;

        rows.iter().map(temperature_row).collect()
    }

    async fn daily_temperatures_since(
        &self,
        station: &str,
        since: Date,
    ) -> Result<Vec<TemperatureRow>, Error> {
        let mut placeholders = Parameters::new();
        let query = select(("date", "tobs"))
            .from(MEASUREMENT_TABLE.name)
            .where_(format!("station = {}", placeholders.next()))
            .where_(format!("date >= {}", placeholders.next()))
            .group_by("date");
        let rows = self
            .query(query, vec![station.to_owned(), format_iso_date(since)?])
            .await?;

        let mut temperatures = rows
            .iter()
            .map(temperature_row)
            .collect::<Result<Vec<_>, Error>>()?;
        // zero-padded ISO dates sort chronologically as strings
        temperatures.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(temperatures)
    }

    async fn temperature_summary(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<TemperatureSummary, Error> {
        let mut placeholders = Parameters::new();
        let mut values = vec![format_iso_date(start)?];
        let mut query = select((
            "MIN(tobs)".as_("min_tobs"),
            "AVG(tobs)".as_("avg_tobs"),
            "MAX(tobs)".as_("max_tobs"),
        ))
        .from(MEASUREMENT_TABLE.name)
        .where_(format!("date >= {}", placeholders.next()));

        if let Some(end) = end {
            query = query.where_(format!("date <= {}", placeholders.next()));
            values.push(format_iso_date(end)?);
        }

        let rows = self.query(query, values).await?;
        let Some(row) = rows.first() else {
            return Ok(TemperatureSummary::default());
        };
        Ok(TemperatureSummary {
            min: row.try_get("min_tobs")?,
            avg: row.try_get("avg_tobs")?,
            max: row.try_get("max_tobs")?,
        })
    }
}

fn temperature_row(row: &SqliteRow) -> Result<TemperatureRow, Error> {
    Ok(TemperatureRow {
        date: row.try_get("date")?,
        tobs: row.try_get("tobs")?,
    })
}

/// First station holding the highest count; ties keep the earlier entry.
fn busiest(counts: Vec<(String, i64)>) -> Option<String> {
    let mut best: Option<(String, i64)> = None;
    for (station, count) in counts {
        match &best {
            Some((_, top)) if *top >= count => {}
            _ => best = Some((station, count)),
        }
    }
    best.map(|(station, _)| station)
}
