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

//! coordinate reference systems we can resolve datasets into, and the transformations between them.
//! Each supported EPSG code maps to a proj string that is handed to `proj4rs`. All transformations
//! pivot through geographic (lon,lat) degrees. Geographic systems are treated as equivalent (the
//! NAD83 - WGS84 datum shift is below a meter and ignored)

use std::{fmt,str::FromStr};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize,Deserialize};
use proj4rs::{Proj, adaptors::transform_vertex_2d};

use crate::errors::{FirecompGeoError, Result, out_of_domain};
use firecomp_common::angle::{is_valid_latitude, longitude_delta, normalize_180};

pub const EPSG_WGS84: u32 = 4326;
pub const EPSG_NAD83: u32 = 4269;
pub const EPSG_WEB_MERCATOR: u32 = 3857;
pub const EPSG_BC_ALBERS: u32 = 3005;

/// Web Mercator is square, which cuts off at this latitude
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051128779806604;

/// max distance from the central meridian we accept for transverse mercator (UTM) positions
pub const TM_MAX_LON_DELTA: f64 = 30.0;

const WGS84_LONLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

lazy_static! {
    static ref SRS_RE: Regex = Regex::new(r"^(?i)\s*(?:EPSG\s*:\s*)?(\d{4,5})\s*$").unwrap();
    static ref UTM_RE: Regex = Regex::new(r"^(?i)\s*UTM\s*(\d{1,2})\s*([NS])\s*$").unwrap();
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(try_from="String", into="String")]
pub enum Crs {
    /// lon/lat in degrees
    Geographic { epsg: u32 },
    WebMercator,
    /// WGS84 based UTM zones (EPSG:326xx and 327xx)
    Utm { zone: u32, north: bool },
    /// NAD83 based UTM zones (EPSG:269xx), northern hemisphere only
    Nad83Utm { zone: u32 },
    BcAlbers,
}

impl Crs {
    pub const WGS84: Crs = Crs::Geographic { epsg: EPSG_WGS84 };

    pub fn from_epsg (epsg: u32)->Result<Crs> {
        match epsg {
            EPSG_WGS84 | EPSG_NAD83 => Ok( Crs::Geographic{ epsg }),
            EPSG_WEB_MERCATOR | 900913 => Ok( Crs::WebMercator),
            EPSG_BC_ALBERS => Ok( Crs::BcAlbers),
            32601..=32660 => Ok( Crs::Utm { zone: epsg - 32600, north: true }),
            32701..=32760 => Ok( Crs::Utm { zone: epsg - 32700, north: false }),
            26901..=26923 => Ok( Crs::Nad83Utm { zone: epsg - 26900 }),
            _ => Err( FirecompGeoError::UnsupportedCrs( format!("EPSG:{epsg}")))
        }
    }

    /// parse textual CRS specs such as "EPSG:3005", "3005", "WGS84" or "UTM10N"
    pub fn from_srs_spec (spec: &str)->Result<Crs> {
        if let Some(cap) = SRS_RE.captures(spec) {
            let epsg: u32 = cap[1].parse().map_err(|_| FirecompGeoError::UnsupportedCrs(spec.to_string()))?;
            return Crs::from_epsg( epsg)
        }
        if let Some(cap) = UTM_RE.captures(spec) {
            let zone: u32 = cap[1].parse().map_err(|_| FirecompGeoError::UnsupportedCrs(spec.to_string()))?;
            if zone == 0 || zone > 60 {
                return Err( FirecompGeoError::UnsupportedCrs( spec.to_string()))
            }
            return Ok( Crs::Utm { zone, north: cap[2].eq_ignore_ascii_case("N") })
        }

        match spec.trim().to_ascii_uppercase().as_str() {
            "WGS84" | "WGS 84" | "CRS84" => Ok( Crs::WGS84),
            "NAD83" => Ok( Crs::Geographic { epsg: EPSG_NAD83 }),
            "WEBMERCATOR" | "PSEUDO-MERCATOR" => Ok( Crs::WebMercator),
            "BCALBERS" | "BC ALBERS" => Ok( Crs::BcAlbers),
            _ => Err( FirecompGeoError::UnsupportedCrs( spec.to_string()))
        }
    }

    pub fn epsg (&self)->u32 {
        match *self {
            Crs::Geographic { epsg } => epsg,
            Crs::WebMercator => EPSG_WEB_MERCATOR,
            Crs::Utm { zone, north } => if north { 32600 + zone } else { 32700 + zone },
            Crs::Nad83Utm { zone } => 26900 + zone,
            Crs::BcAlbers => EPSG_BC_ALBERS,
        }
    }

    pub fn is_geographic (&self)->bool {
        matches!( self, Crs::Geographic{..})
    }

    /// do positions in `self` and `other` have the same coordinates (up to the datum shift we ignore)
    pub fn is_equivalent (&self, other: &Crs)->bool {
        match (*self, *other) {
            (Crs::Geographic{..}, Crs::Geographic{..}) => true,
            (Crs::Utm { zone: a, north: true }, Crs::Nad83Utm { zone: b }) |
            (Crs::Nad83Utm { zone: a }, Crs::Utm { zone: b, north: true }) => a == b,
            _ => self == other
        }
    }

    /// the UTM zone crs for a given geographic position (without the Norway/Svalbard exceptions)
    pub fn utm_for_lon_lat (lon: f64, lat: f64)->Result<Crs> {
        if !is_valid_latitude(lat) || !lon.is_finite() || lat < -80.0 || lat > 84.0 {
            return Err( out_of_domain( format!("no UTM zone for ({lon},{lat})")))
        }
        let lon = normalize_180(lon);
        let zone = (((lon + 180.0) / 6.0).floor() as u32).min(59) + 1;
        Ok( Crs::Utm { zone, north: lat >= 0.0 })
    }

    /// the proj string we use to instantiate this crs
    pub fn proj_string (&self)->String {
        match *self {
            Crs::Geographic { epsg: EPSG_NAD83 } => "+proj=longlat +datum=NAD83 +no_defs".to_string(),
            Crs::Geographic{..} => WGS84_LONLAT.to_string(),
            Crs::WebMercator => "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs".to_string(),
            Crs::Utm { zone, north } => {
                let south = if north { "" } else { " +south" };
                format!("+proj=utm +zone={zone}{south} +datum=WGS84 +units=m +no_defs")
            }
            Crs::Nad83Utm { zone } => format!("+proj=utm +zone={zone} +datum=NAD83 +units=m +no_defs"),
            Crs::BcAlbers => "+proj=aea +lat_0=45 +lon_0=-126 +lat_1=50 +lat_2=58.5 +x_0=1000000 +y_0=0 +datum=NAD83 +units=m +no_defs".to_string(),
        }
    }

    fn proj (&self)->Result<Proj> {
        Proj::from_proj_string( &self.proj_string())
            .map_err( |e| FirecompGeoError::UnsupportedCrs( format!("{self}: {e}")))
    }

    /// reject geographic positions that are valid but outside of where this crs is usable
    fn check_domain (&self, lon: f64, lat: f64)->Result<()> {
        match *self {
            Crs::WebMercator if lat.abs() > WEB_MERCATOR_MAX_LAT => {
                Err( out_of_domain( format!("latitude {lat} outside of {self}")))
            }
            Crs::Utm { zone, .. } | Crs::Nad83Utm { zone } if longitude_delta( lon, utm_central_meridian(zone)) > TM_MAX_LON_DELTA => {
                Err( out_of_domain( format!("longitude {lon} too far from central meridian of {self}")))
            }
            _ => Ok(())
        }
    }

    /// convert (x,y) in this crs into geographic (lon,lat) degrees
    pub fn to_geographic (&self, x: f64, y: f64)->Result<(f64,f64)> {
        if self.is_geographic() {
            check_geographic( x, y)
        } else {
            Transformer::new( self, &Crs::WGS84)?.transform( x, y)
        }
    }

    /// convert geographic (lon,lat) degrees into (x,y) of this crs
    pub fn from_geographic (&self, lon: f64, lat: f64)->Result<(f64,f64)> {
        let (lon,lat) = check_geographic( lon, lat)?;
        if self.is_geographic() {
            Ok( (lon,lat) )
        } else {
            Transformer::new( &Crs::WGS84, self)?.transform( lon, lat)
        }
    }
}

fn utm_central_meridian (zone: u32)->f64 {
    zone as f64 * 6.0 - 183.0
}

fn check_geographic (lon: f64, lat: f64)->Result<(f64,f64)> {
    if is_valid_latitude(lat) && lon.is_finite() {
        Ok( (normalize_180(lon), lat) )
    } else {
        Err( out_of_domain( format!("invalid geographic position ({lon},{lat})")))
    }
}

/// transform a single position from `src` to `tgt`. This is the identity if both are equivalent
pub fn transform (src: &Crs, tgt: &Crs, x: f64, y: f64)->Result<(f64,f64)> {
    Transformer::new( src, tgt)?.transform( x, y)
}

/// a reusable transformation that parses its proj definitions only once
pub struct Transformer {
    src: Crs,
    tgt: Crs,
    src_proj: Proj,
    geo_proj: Proj,
    tgt_proj: Proj,
    identity: bool,
}

impl Transformer {
    pub fn new (src: &Crs, tgt: &Crs)->Result<Self> {
        let geo_proj = Proj::from_proj_string( WGS84_LONLAT)
            .map_err( |e| FirecompGeoError::UnsupportedCrs( format!("{}: {e}", Crs::WGS84)))?;

        Ok( Transformer {
            src: *src,
            tgt: *tgt,
            src_proj: src.proj()?,
            geo_proj,
            tgt_proj: tgt.proj()?,
            identity: src.is_equivalent(tgt)
        })
    }

    pub fn is_identity (&self)->bool { self.identity }

    pub fn transform (&self, x: f64, y: f64)->Result<(f64,f64)> {
        if self.identity { return Ok( (x,y) ) }

        // proj4rs takes and returns geographic coordinates in radians
        let (lon,lat) = if self.src.is_geographic() {
            check_geographic( x, y)?
        } else {
            if !(x.is_finite() && y.is_finite()) {
                return Err( out_of_domain( format!("invalid {} position ({x},{y})", self.src)))
            }
            let (lon,lat) = transform_vertex_2d( &self.src_proj, &self.geo_proj, (x,y))
                .map_err( |e| out_of_domain( format!("{} ({x},{y}): {e}", self.src)))?;
            check_geographic( lon.to_degrees(), lat.to_degrees())?
        };

        if self.tgt.is_geographic() {
            return Ok( (lon,lat) )
        }

        self.tgt.check_domain( lon, lat)?;
        let (tx,ty) = transform_vertex_2d( &self.geo_proj, &self.tgt_proj, (lon.to_radians(), lat.to_radians()))
            .map_err( |e| out_of_domain( format!("{} ({lon},{lat}): {e}", self.tgt)))?;
        if tx.is_finite() && ty.is_finite() {
            Ok( (tx,ty) )
        } else {
            Err( out_of_domain( format!("({lon},{lat}) has no finite position in {}", self.tgt)))
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

impl FromStr for Crs {
    type Err = FirecompGeoError;
    fn from_str (s: &str)->Result<Self> { Crs::from_srs_spec(s) }
}

impl TryFrom<String> for Crs {
    type Error = FirecompGeoError;
    fn try_from (s: String)->Result<Self> { Crs::from_srs_spec(&s) }
}

impl From<Crs> for String {
    fn from (crs: Crs)->String { crs.to_string() }
}
