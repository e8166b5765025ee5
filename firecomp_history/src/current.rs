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

//! loaders for the current-year fire data, a point CSV with one row per fire and an attribute CSV
//! of the fire perimeter polygons

use std::{fs::File, io, path::Path};
use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Serialize,Deserialize};
use tracing::{info,warn};
use firecomp_common::{angle::{is_valid_latitude, is_valid_longitude}, datetime::parse_date};
use firecomp_geo::coords::{normalize, CoordAxis, CoordPolicy};

use crate::record::parse_size;
use crate::errors::{missing_column, FirecompHistoryError, Result};

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CurrentFire {
    pub fire_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub size_hectares: f64,
    pub discovery_date: Option<NaiveDate>,
}

impl CurrentFire {
    pub fn location (&self)->Option<(f64,f64)> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) => Some((lon,lat)),
            _ => None
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CurrentPerimeter {
    pub fire_id: String,
    pub area_hectares: f64,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct CurrentColumns {
    pub fire_id: String,
    pub latitude: String,
    pub longitude: String,
    pub size_hectares: String,
    pub discovery_date: String,
}

impl Default for CurrentColumns {
    fn default()->Self {
        CurrentColumns {
            fire_id: "FIRE_NUMBER".into(),
            latitude: "LATITUDE".into(),
            longitude: "LONGITUDE".into(),
            size_hectares: "CURRENT_SIZE".into(),
            discovery_date: "IGNITION_DATE".into(),
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct PerimeterColumns {
    pub fire_id: String,
    pub area_hectares: String,
}

impl Default for PerimeterColumns {
    fn default()->Self {
        PerimeterColumns { fire_id: "FIRE_NUMBER".into(), area_hectares: "FIRE_SIZE_HECTARES".into() }
    }
}

fn column (headers: &StringRecord, name: &str)->Result<usize> {
    headers.iter().position( |h| h.trim().eq_ignore_ascii_case( name.trim())).ok_or_else( || missing_column( name))
}

/// decimal degrees as in the open data exports, falling back to "<degrees> <minutes>"
fn decimal_or_dm (s: &str, axis: CoordAxis)->Option<f64> {
    match s.trim().parse::<f64>() {
        Ok(v) => {
            let valid = match axis {
                CoordAxis::Latitude => is_valid_latitude(v),
                CoordAxis::Longitude => is_valid_longitude(v),
            };
            if valid { Some(v) } else { None }
        }
        Err(_) => normalize( s, axis).ok()
    }
}

pub fn read_current_fires (reader: impl io::Read, columns: &CurrentColumns, policy: CoordPolicy)->Result<Vec<CurrentFire>> {
    let mut csv_reader = csv::Reader::from_reader( reader);
    let headers = csv_reader.headers()?.clone();

    let i_id = column( &headers, &columns.fire_id)?;
    let i_lat = column( &headers, &columns.latitude)?;
    let i_lon = column( &headers, &columns.longitude)?;
    let i_size = column( &headers, &columns.size_hectares)?;
    let i_date = column( &headers, &columns.discovery_date)?;

    let mut fires: Vec<CurrentFire> = Vec::new();
    let mut n_malformed = 0;

    for res in csv_reader.records() {
        let rec = res?;
        let field = |i: usize| rec.get(i).unwrap_or("");
        let fire_id = field(i_id).trim().to_string();

        let Some(size_hectares) = parse_size( field(i_size)) else {
            warn!("ignoring current fire '{fire_id}' without size");
            continue
        };

        let latitude = decimal_or_dm( field(i_lat), CoordAxis::Latitude);
        let longitude = decimal_or_dm( field(i_lon), CoordAxis::Longitude);
        if latitude.is_none() || longitude.is_none() {
            n_malformed += 1;
            match policy {
                CoordPolicy::Missing => warn!("current fire '{fire_id}' has malformed location ({},{})", field(i_lat), field(i_lon)),
                CoordPolicy::Drop => {
                    warn!("dropping current fire '{fire_id}' with malformed location");
                    continue
                }
                CoordPolicy::Fail => {
                    return Err( FirecompHistoryError::MalformedRecord( format!("current fire '{fire_id}' location ({},{})", field(i_lat), field(i_lon))))
                }
            }
        }

        fires.push( CurrentFire { fire_id, latitude, longitude, size_hectares, discovery_date: parse_date( field(i_date)) });
    }

    info!("read {} current fires ({n_malformed} with malformed location)", fires.len());
    Ok(fires)
}

pub fn load_current_fires (path: impl AsRef<Path>, columns: &CurrentColumns, policy: CoordPolicy)->Result<Vec<CurrentFire>> {
    read_current_fires( File::open( path.as_ref())?, columns, policy)
}

pub fn read_perimeters (reader: impl io::Read, columns: &PerimeterColumns)->Result<Vec<CurrentPerimeter>> {
    let mut csv_reader = csv::Reader::from_reader( reader);
    let headers = csv_reader.headers()?.clone();

    let i_id = column( &headers, &columns.fire_id)?;
    let i_area = column( &headers, &columns.area_hectares)?;

    let mut perimeters = Vec::new();
    for res in csv_reader.records() {
        let rec = res?;
        let fire_id = rec.get(i_id).unwrap_or("").trim().to_string();
        match rec.get(i_area).and_then( parse_size) {
            Some(area_hectares) => perimeters.push( CurrentPerimeter { fire_id, area_hectares }),
            None => warn!("ignoring perimeter '{fire_id}' without area")
        }
    }

    info!("read {} current fire perimeters", perimeters.len());
    Ok(perimeters)
}

pub fn load_perimeters (path: impl AsRef<Path>, columns: &PerimeterColumns)->Result<Vec<CurrentPerimeter>> {
    read_perimeters( File::open( path.as_ref())?, columns)
}
