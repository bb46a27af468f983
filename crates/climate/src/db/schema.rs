use log::{debug, info};
use sqlx::{Row, SqliteConnection};

use super::Error;

/// Name and required columns of a table the API reads from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableShape {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Station metadata, only the code is consumed
pub const STATION_TABLE: TableShape = TableShape {
    name: "station",
    columns: &["station"],
};

/// One row per station and day; `date` is `YYYY-MM-DD` text and `prcp` may be NULL
pub const MEASUREMENT_TABLE: TableShape = TableShape {
    name: "measurement",
    columns: &["station", "date", "prcp", "tobs"],
};

pub const TABLES: [TableShape; 2] = [STATION_TABLE, MEASUREMENT_TABLE];

impl TableShape {
    /// Checks the live table carries every declared column.
    pub async fn verify(&self, conn: &mut SqliteConnection) -> Result<(), Error> {
        // PRAGMA arguments can't be bound, names come from the constants above
        let pragma = format!("PRAGMA table_info({})", self.name);
        let rows = sqlx::query(&pragma)
            .fetch_all(&mut *conn)
            .await?;
        if rows.is_empty() {
            return Err(Error::MissingTable(self.name.to_string()));
        }

        let found = rows
            .iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("table {} has columns {:?}", self.name, found);

        for column in self.columns {
            if !found.iter().any(|name| name.eq_ignore_ascii_case(column)) {
                return Err(Error::MissingColumn {
                    table: self.name.to_string(),
                    column: column.to_string(),
                });
            }
        }
        info!("verified table {}", self.name);
        Ok(())
    }
}
