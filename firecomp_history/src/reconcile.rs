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

//! mapping of the historical and current-year sources into the common (size, period) schema.
//! This is a pure mapping, records are never merged

use chrono::Datelike;
use serde::{Serialize,Deserialize};

use crate::record::FireRecord;
use crate::current::{CurrentFire, CurrentPerimeter};
use crate::errors::{config_error, Result};

/// a labeled, inclusive range of years
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct Period {
    pub label: String,
    pub first_year: i32,
    pub last_year: i32,
}

impl Period {
    pub fn new (label: impl ToString, first_year: i32, last_year: i32)->Self {
        Period { label: label.to_string(), first_year, last_year }
    }

    pub fn contains (&self, year: i32)->bool {
        year >= self.first_year && year <= self.last_year
    }
}

/// periods need unique labels and must not overlap (each year maps to at most one period)
pub fn check_periods (periods: &[Period])->Result<()> {
    for (i,p) in periods.iter().enumerate() {
        if p.first_year > p.last_year {
            return Err( config_error( format!("period '{}' ends before it starts", p.label)))
        }
        for q in &periods[i+1..] {
            if p.label == q.label {
                return Err( config_error( format!("duplicated period label '{}'", p.label)))
            }
            if p.first_year <= q.last_year && q.first_year <= p.last_year {
                return Err( config_error( format!("periods '{}' and '{}' overlap", p.label, q.label)))
            }
        }
    }
    Ok(())
}

pub fn period_for_year (periods: &[Period], year: i32)->Option<&Period> {
    periods.iter().find( |p| p.contains(year))
}

/// the common schema both sources are mapped into
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct PeriodSample {
    pub size_hectares: f64,
    pub period: String,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// historical records that fall into one of the periods
pub fn samples_from_history (records: &[FireRecord], periods: &[Period])->Vec<PeriodSample> {
    records.iter().filter_map( |r| {
        period_for_year( periods, r.year).map( |p| PeriodSample {
            size_hectares: r.size_hectares,
            period: p.label.clone(),
            year: Some(r.year),
            month: Some(r.month),
        })
    }).collect()
}

/// all current fires, labeled with the current period
pub fn samples_from_current (fires: &[CurrentFire], period: &Period)->Vec<PeriodSample> {
    let year = (period.first_year == period.last_year).then_some( period.first_year);
    fires.iter().map( |f| PeriodSample {
        size_hectares: f.size_hectares,
        period: period.label.clone(),
        year: f.discovery_date.map( |d| d.year()).or(year),
        month: f.discovery_date.map( |d| d.month()),
    }).collect()
}

/// perimeter areas as current period samples. Perimeters don't carry dates
pub fn samples_from_perimeters (perimeters: &[CurrentPerimeter], period: &Period)->Vec<PeriodSample> {
    let year = (period.first_year == period.last_year).then_some( period.first_year);
    perimeters.iter().map( |p| PeriodSample {
        size_hectares: p.area_hectares,
        period: period.label.clone(),
        year,
        month: None,
    }).collect()
}

/// concatenate the mapped sources
pub fn reconcile (historical: Vec<PeriodSample>, current: Vec<PeriodSample>)->Vec<PeriodSample> {
    let mut samples = historical;
    samples.extend( current);
    samples
}
