/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! historical fire records and their conversion from raw table rows

use chrono::{Datelike, NaiveDate};
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};
use firecomp_common::datetime::{month_key, parse_naive_date, DEFAULT_DATE_FORMATS};
use firecomp_geo::coords::{normalize, CoordAxis, CoordPolicy};

use crate::scrape::RawTable;
use crate::errors::{missing_column, FirecompHistoryError, Result};

/// a single fire of the historical table. Coordinates are decimal degrees (west negative) or None
/// if the table value was malformed
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct FireRecord {
    pub year: i32,
    pub fire_id: String,
    pub center_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub discovery_date: NaiveDate,
    pub size_hectares: f64,
    pub month: u32,
}

impl FireRecord {
    pub fn month_key (&self)->String { month_key( self.month) }

    /// (lon,lat) if both coordinates are known
    pub fn location (&self)->Option<(f64,f64)> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) => Some((lon,lat)),
            _ => None
        }
    }
}

/// names of the source columns we use. Matching is case insensitive
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub year: String,
    pub fire_id: String,
    pub center_name: String,
    pub latitude: String,
    pub longitude: String,
    pub discovery_date: String,
    pub size_hectares: String,
}

impl Default for ColumnMap {
    fn default()->Self {
        ColumnMap {
            year: "Year".into(),
            fire_id: "Fire Number".into(),
            center_name: "Fire Centre".into(),
            latitude: "Latitude".into(),
            longitude: "Longitude".into(),
            discovery_date: "Discovery Date".into(),
            size_hectares: "Size (ha)".into(),
        }
    }
}

/// column positions resolved against a concrete header
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct ColumnIndices {
    pub year: usize,
    pub fire_id: usize,
    pub center_name: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub discovery_date: usize,
    pub size_hectares: usize,
}

impl ColumnMap {
    /// fails with a schema error naming the first configured column that is not in `table`
    pub fn resolve (&self, table: &RawTable)->Result<ColumnIndices> {
        let idx = |name: &String| table.column_index( name).ok_or_else( || missing_column( name));
        Ok( ColumnIndices {
            year: idx( &self.year)?,
            fire_id: idx( &self.fire_id)?,
            center_name: idx( &self.center_name)?,
            latitude: idx( &self.latitude)?,
            longitude: idx( &self.longitude)?,
            discovery_date: idx( &self.discovery_date)?,
            size_hectares: idx( &self.size_hectares)?,
        })
    }
}

/// records of a table conversion together with what got lost on the way
#[derive(Debug,Clone,Default,PartialEq,Serialize)]
pub struct RecordBatch {
    pub records: Vec<FireRecord>,
    /// coordinate values that did not parse (whatever the policy did with them)
    pub malformed_coordinates: usize,
    /// records removed because of malformed coordinates
    pub dropped: usize,
    /// rows without parseable date or size
    pub skipped_rows: usize,
}

impl RecordBatch {
    pub fn located (&self)->impl Iterator<Item=(usize,f64,f64)> + '_ {
        self.records.iter().enumerate().filter_map( |(i,r)| r.location().map( |(lon,lat)| (i,lon,lat)))
    }
}

/// parse numbers such as "1,234.5" or "12 ha"
pub fn parse_size (s: &str)->Option<f64> {
    let cleaned: String = s.chars().filter( |c| *c != ',').collect();
    let num = cleaned.trim().split_whitespace().next()?;
    num.parse::<f64>().ok().filter( |v| v.is_finite() && *v >= 0.0)
}

/// apply the coordinate policy to a single value. Ok(None) means the record should be dropped
fn coordinate (s: &str, axis: CoordAxis, policy: CoordPolicy, fire_id: &str, batch: &mut RecordBatch)->Result<Option<Option<f64>>> {
    match normalize( s, axis) {
        Ok(v) => Ok( Some(Some(v))),
        Err(e) => {
            batch.malformed_coordinates += 1;
            match policy {
                CoordPolicy::Missing => {
                    warn!("fire {fire_id}: {e}, keeping record without location");
                    Ok( Some(None))
                }
                CoordPolicy::Drop => {
                    warn!("fire {fire_id}: {e}, dropping record");
                    Ok( None)
                }
                CoordPolicy::Fail => Err( FirecompHistoryError::MalformedRecord( format!("fire {fire_id}: {e}")))
            }
        }
    }
}

/// convert the rows of the historical table into [`FireRecord`]s. Columns have to be present
/// (schema error otherwise), rows without parseable discovery date or size are skipped
pub fn records_from_table<S: AsRef<str>> (table: &RawTable, columns: &ColumnMap, policy: CoordPolicy, date_formats: &[S])->Result<RecordBatch> {
    let idx = columns.resolve( table)?;
    let mut batch = RecordBatch::default();

    for row in &table.rows {
        if row.len() < table.headers.len() {
            batch.skipped_rows += 1;
            continue
        }
        let fire_id = row[idx.fire_id].trim().to_string();

        let Some(discovery_date) = parse_naive_date( &row[idx.discovery_date], date_formats) else {
            debug!("skipping fire '{fire_id}' with unparseable date '{}'", row[idx.discovery_date]);
            batch.skipped_rows += 1;
            continue
        };
        let Some(size_hectares) = parse_size( &row[idx.size_hectares]) else {
            debug!("skipping fire '{fire_id}' with unparseable size '{}'", row[idx.size_hectares]);
            batch.skipped_rows += 1;
            continue
        };
        let year = row[idx.year].trim().parse::<i32>().unwrap_or( discovery_date.year());

        let Some(latitude) = coordinate( &row[idx.latitude], CoordAxis::Latitude, policy, &fire_id, &mut batch)? else {
            batch.dropped += 1;
            continue
        };
        let Some(longitude) = coordinate( &row[idx.longitude], CoordAxis::Longitude, policy, &fire_id, &mut batch)? else {
            batch.dropped += 1;
            continue
        };

        batch.records.push( FireRecord {
            year,
            fire_id,
            center_name: row[idx.center_name].trim().to_string(),
            latitude,
            longitude,
            discovery_date,
            size_hectares,
            month: discovery_date.month(),
        });
    }

    if batch.malformed_coordinates > 0 {
        warn!("{} malformed coordinate values ({:?} policy)", batch.malformed_coordinates, policy);
    }
    debug!("converted {} of {} rows", batch.records.len(), table.rows.len());
    Ok(batch)
}

/// [`records_from_table`] with the default date formats
pub fn records_from_table_default (table: &RawTable, columns: &ColumnMap, policy: CoordPolicy)->Result<RecordBatch> {
    records_from_table( table, columns, policy, DEFAULT_DATE_FORMATS)
}
