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
#![allow(unused)]

use serde::Deserialize;
use firecomp_common::{angle::*, config::{config_from_str, resolve_config_path}, datetime::{parse_date, month_key}, load_config, CommonError};
use chrono::{Datelike, NaiveDate};
use std::path::Path;

#[derive(Debug,Deserialize)]
struct TestConfig {
    name: String,
    months: Vec<u32>,
    target: Option<String>
}

#[test]
fn test_ron_config() {
    let input = r#"TestConfig( name: "bc", months: [6,7,8], target: Some("EPSG:3005") )"#;
    let conf: TestConfig = config_from_str( input).unwrap();
    println!("{conf:?}");
    assert_eq!( conf.name, "bc");
    assert_eq!( conf.months, vec![6,7,8]);
    assert_eq!( conf.target.as_deref(), Some("EPSG:3005"));

    let res: Result<TestConfig,CommonError> = config_from_str( "TestConfig( name: 42 )");
    assert!( res.is_err());
}

#[test]
fn test_missing_config() {
    let res: Result<TestConfig,CommonError> = load_config( "no/such/config.ron");
    assert!( matches!( res, Err(CommonError::ConfigError(_))));
}

#[test]
fn test_resolve_path() {
    let p = resolve_config_path( "configs/firecomp.ron", "data/dem.tif");
    assert_eq!( p, Path::new("configs/data/dem.tif"));

    let p = resolve_config_path( "configs/firecomp.ron", "/tmp/dem.tif");
    assert_eq!( p, Path::new("/tmp/dem.tif"));
}

#[test]
fn test_dates() {
    let d = parse_date( "2013-07-04").unwrap();
    assert_eq!( (d.year(), d.month(), d.day()), (2013, 7, 4));
    assert_eq!( parse_date( "04-Jul-2013"), NaiveDate::from_ymd_opt( 2013, 7, 4));
    assert_eq!( parse_date( "July 15, 2013"), NaiveDate::from_ymd_opt( 2013, 7, 15));
    assert!( parse_date( "not a date").is_none());
    assert!( parse_date( "").is_none());
    assert_eq!( month_key( d.month()), "07");
}

#[test]
fn test_angles() {
    assert_eq!( normalize_180( 190.0), -170.0);
    assert!( is_valid_latitude( -90.0));
    assert!( !is_valid_latitude( 90.5));
    assert!( !is_valid_longitude( f64::NAN));
    assert!( (longitude_delta( 179.0, -179.0) - 2.0).abs() < 1e-12);
}
