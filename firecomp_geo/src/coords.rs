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

//! conversion of textual "<degrees> <minutes>" coordinates into signed decimal degrees.
//!
//! Fire tables store positions as unsigned degree/minute pairs ("49 30", "123 15") with an implied
//! northern latitude and western longitude. Parsing is strict - the lenient variants and
//! [`CoordPolicy`] decide what a batch does with values that don't parse.

use std::fmt;
use serde::{Serialize,Deserialize};
use tracing::warn;
use firecomp_common::angle::{is_valid_latitude, is_valid_longitude};

use crate::errors::{malformed, Result};

/// which coordinate a textual value represents. Longitudes are west of Greenwich unless they
/// carry an explicit sign
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum CoordAxis {
    Latitude,
    Longitude
}

impl fmt::Display for CoordAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordAxis::Latitude => write!(f, "latitude"),
            CoordAxis::Longitude => write!(f, "longitude"),
        }
    }
}

/// what to do with records that have malformed coordinates
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum CoordPolicy {
    /// keep the record with missing coordinates (excluded from spatial joins)
    #[default]
    Missing,
    /// remove the record from the batch
    Drop,
    /// abort the run
    Fail
}

/// parse "<degrees> <minutes>" into decimal degrees (degrees + minutes/60).
/// Degrees have to be an integer number with optional sign (which applies to the whole value),
/// minutes can be fractional but have to be within [0,60). Degree and minute marks are optional
/// ("49°30'" is the same as "49 30").
pub fn parse_degrees_minutes (s: &str) -> Result<f64> {
    let cleaned: String = s.chars()
        .map(|c| match c { '°' | '\'' | '′' => ' ', c => c })
        .collect();
    let mut tokens = cleaned.split_whitespace();

    let (deg_tok, min_tok) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(d), Some(m), None) => (d,m),
        (Some(_), None, _) => return Err( malformed( format!("missing minutes in '{s}'"))),
        (None, _, _) => return Err( malformed( "empty coordinate")),
        _ => return Err( malformed( format!("too many components in '{s}'")))
    };

    let negative = deg_tok.starts_with('-');
    let deg: i32 = deg_tok.parse().map_err(|_| malformed( format!("invalid degrees '{deg_tok}' in '{s}'")))?;
    let min: f64 = min_tok.parse().map_err(|_| malformed( format!("invalid minutes '{min_tok}' in '{s}'")))?;

    if !min.is_finite() || min < 0.0 || min >= 60.0 {
        return Err( malformed( format!("minutes out of range in '{s}'")))
    }

    let v = deg.unsigned_abs() as f64 + min / 60.0;
    Ok( if negative { -v } else { v })
}

/// does the textual value carry an explicit sign
fn is_signed (s: &str)->bool {
    let s = s.trim_start();
    s.starts_with('-') || s.starts_with('+')
}

/// parse a latitude in decimal degrees, checking the [-90,90] range
pub fn normalize_latitude (s: &str) -> Result<f64> {
    let lat = parse_degrees_minutes( s)?;
    if is_valid_latitude( lat) {
        Ok(lat)
    } else {
        Err( malformed( format!("latitude out of range: '{s}'")))
    }
}

/// parse a longitude in decimal degrees. Unsigned values are taken to be in the western
/// hemisphere and get negated, explicitly signed values are used as is
pub fn normalize_longitude (s: &str) -> Result<f64> {
    let v = parse_degrees_minutes( s)?;
    let lon = if is_signed(s) { v } else { -v };

    if is_valid_longitude( lon) {
        Ok(lon)
    } else {
        Err( malformed( format!("longitude out of range: '{s}'")))
    }
}

pub fn normalize (s: &str, axis: CoordAxis) -> Result<f64> {
    match axis {
        CoordAxis::Latitude => normalize_latitude(s),
        CoordAxis::Longitude => normalize_longitude(s),
    }
}

/// lenient version of [`normalize`] - malformed input becomes a missing value
pub fn normalize_lenient (s: &str, axis: CoordAxis) -> Option<f64> {
    match normalize( s, axis) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("ignoring {axis} '{s}': {e}");
            None
        }
    }
}

/// format decimal degrees back into the unsigned "<degrees> <minutes>" table notation
pub fn format_degrees_minutes (deg: f64, decimals: usize)->String {
    let a = deg.abs();
    let mut d = a.trunc();
    let mut m = (a - d) * 60.0;

    // avoid "49 60.00" due to rounding
    let scale = 10f64.powi(decimals as i32);
    if (m * scale).round() / scale >= 60.0 {
        d += 1.0;
        m = 0.0;
    }
    format!("{} {:.*}", d as i64, decimals, m)
}
