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

use firecomp_geo::{FirecompGeoError, crs::*};

/// run with "cargo test -p firecomp_geo --test test_crs -- --nocapture"

const DEG_EPS: f64 = 1e-6;

fn assert_round_trip (crs: &Crs, lon: f64, lat: f64) {
    let (x,y) = crs.from_geographic( lon, lat).unwrap();
    let (lon1,lat1) = crs.to_geographic( x, y).unwrap();
    let (dlon, dlat) = ((lon1 - lon).abs(), (lat1 - lat).abs());
    assert!( dlon < DEG_EPS && dlat < DEG_EPS, "{crs} round trip of ({lon},{lat}) -> ({x},{y}) -> ({lon1},{lat1})");
}

#[test]
fn test_srs_spec () {
    assert_eq!( Crs::from_srs_spec("EPSG:3005").unwrap(), Crs::BcAlbers);
    assert_eq!( Crs::from_srs_spec("3005").unwrap(), Crs::BcAlbers);
    assert_eq!( Crs::from_srs_spec("epsg:32610").unwrap(), Crs::Utm{ zone: 10, north: true });
    assert_eq!( Crs::from_srs_spec("EPSG:32755").unwrap(), Crs::Utm{ zone: 55, north: false });
    assert_eq!( Crs::from_srs_spec("UTM10N").unwrap(), Crs::Utm{ zone: 10, north: true });
    assert_eq!( Crs::from_srs_spec("WGS84").unwrap(), Crs::WGS84);
    assert_eq!( Crs::from_srs_spec("EPSG:3857").unwrap(), Crs::WebMercator);
    assert_eq!( Crs::from_srs_spec("EPSG:4269").unwrap(), Crs::Geographic{ epsg: 4269 });

    assert!( matches!( Crs::from_srs_spec("EPSG:9999"), Err(FirecompGeoError::UnsupportedCrs(_))));
    assert!( Crs::from_srs_spec("UTM61N").is_err());

    assert_eq!( Crs::BcAlbers.to_string(), "EPSG:3005");
    assert_eq!( Crs::Utm{ zone: 10, north: false }.epsg(), 32710);
}

#[test]
fn test_serde () {
    let s = serde_json::to_string( &Crs::BcAlbers).unwrap();
    assert_eq!( s, "\"EPSG:3005\"");
    let crs: Crs = serde_json::from_str("\"UTM11N\"").unwrap();
    assert_eq!( crs, Crs::Utm{ zone: 11, north: true });
    assert!( serde_json::from_str::<Crs>("\"EPSG:1\"").is_err());
}

#[test]
fn test_utm_zone () {
    assert_eq!( Crs::utm_for_lon_lat( -123.0, 49.0).unwrap(), Crs::Utm{ zone: 10, north: true });
    assert_eq!( Crs::utm_for_lon_lat( 180.0, -10.0).unwrap(), Crs::Utm{ zone: 60, north: false });
    assert_eq!( Crs::utm_for_lon_lat( -180.0, 0.0).unwrap(), Crs::Utm{ zone: 1, north: true });
    assert!( Crs::utm_for_lon_lat( 0.0, 85.0).is_err());
}

#[test]
fn test_known_values () {
    // web mercator easting of 90E is a quarter of the equator circumference
    let (x,y) = Crs::WebMercator.from_geographic( 90.0, 0.0).unwrap();
    assert!( (x - 10018754.171394622).abs() < 1e-4, "x = {x}");
    assert!( y.abs() < 1e-6);

    // projection origin of BC Albers
    let (x,y) = Crs::BcAlbers.from_geographic( -126.0, 45.0).unwrap();
    assert!( (x - 1_000_000.0).abs() < 1e-4, "x = {x}");
    assert!( y.abs() < 1e-4, "y = {y}");

    // central meridian of UTM zone 10
    let (x,y) = Crs::Utm{ zone: 10, north: true }.from_geographic( -123.0, 0.0).unwrap();
    assert!( (x - 500_000.0).abs() < 1e-4);
    assert!( y.abs() < 1e-4);

    let (x,y) = Crs::Utm{ zone: 10, north: false }.from_geographic( -123.0, 0.0).unwrap();
    assert!( (y - 10_000_000.0).abs() < 1e-4);

    // points east of the central meridian have eastings > 500km
    let (x,_) = Crs::Utm{ zone: 10, north: true }.from_geographic( -121.0, 49.0).unwrap();
    assert!( x > 500_000.0 && x < 700_000.0);
}

#[test]
fn test_round_trips () {
    let utm10n = Crs::Utm{ zone: 10, north: true };
    for lat in [0.0, 10.5, 33.3, 49.5, 60.0, 75.0, 83.9] {
        for lon in [-126.0, -124.5, -123.0, -121.25, -120.0] {
            assert_round_trip( &utm10n, lon, lat);
        }
    }

    let utm55s = Crs::Utm{ zone: 55, north: false };
    for lat in [-1.0, -33.8, -42.9, -79.0] {
        for lon in [144.0, 147.0, 150.0] {
            assert_round_trip( &utm55s, lon, lat);
        }
    }

    for lat in [48.3, 49.0, 52.5, 55.0, 59.9] {
        for lon in [-139.0, -133.5, -126.0, -120.2, -114.1] {
            assert_round_trip( &Crs::BcAlbers, lon, lat);
        }
    }

    for lat in [-80.0, -45.0, 0.0, 49.5, 85.0] {
        for lon in [-179.5, -123.25, 0.0, 90.0, 179.5] {
            assert_round_trip( &Crs::WebMercator, lon, lat);
        }
    }
}

#[test]
fn test_transform_between_projections () {
    let utm = Crs::Utm{ zone: 10, north: true };
    let (x,y) = Crs::BcAlbers.from_geographic( -122.5, 50.2).unwrap();

    let (ux,uy) = transform( &Crs::BcAlbers, &utm, x, y).unwrap();
    let (ax,ay) = transform( &utm, &Crs::BcAlbers, ux, uy).unwrap();
    assert!( (ax - x).abs() < 1e-3 && (ay - y).abs() < 1e-3);

    let (lon,lat) = transform( &utm, &Crs::WGS84, ux, uy).unwrap();
    assert!( (lon + 122.5).abs() < DEG_EPS && (lat - 50.2).abs() < DEG_EPS);

    // geographic systems are equivalent
    assert_eq!( transform( &Crs::WGS84, &Crs::Geographic{ epsg: 4269 }, -122.5, 50.2).unwrap(), (-122.5, 50.2));
    assert_eq!( transform( &utm, &utm, 1.0, 2.0).unwrap(), (1.0, 2.0));
}

#[test]
fn test_out_of_domain () {
    assert!( matches!( Crs::WebMercator.from_geographic( 0.0, 86.0), Err(FirecompGeoError::OutOfDomain(_))));
    assert!( Crs::Utm{ zone: 10, north: true }.from_geographic( -60.0, 49.0).is_err());
    assert!( Crs::WGS84.from_geographic( 0.0, 91.0).is_err());
    assert!( Crs::BcAlbers.from_geographic( f64::NAN, 50.0).is_err());
    assert!( matches!( Crs::Nad83Utm{ zone: 10 }.from_geographic( -60.0, 49.0), Err(FirecompGeoError::OutOfDomain(_))));
}

#[test]
fn test_nad83_utm () {
    let crs = Crs::from_epsg( 26910).unwrap();
    assert_eq!( crs, Crs::Nad83Utm{ zone: 10 });
    assert_eq!( crs.epsg(), 26910);
    assert_eq!( crs.to_string(), "EPSG:26910");
    assert_eq!( Crs::from_srs_spec("EPSG:26911").unwrap(), Crs::Nad83Utm{ zone: 11 });
    assert!( Crs::from_epsg( 26924).is_err());

    // same coordinates as the WGS84 based zone
    let utm10n = Crs::Utm{ zone: 10, north: true };
    let (x,y) = crs.from_geographic( -122.5, 50.2).unwrap();
    let (ux,uy) = utm10n.from_geographic( -122.5, 50.2).unwrap();
    assert!( (x - ux).abs() < 1e-3 && (y - uy).abs() < 1e-3, "({x},{y}) != ({ux},{uy})");
    assert_round_trip( &crs, -121.0, 49.0);
}

#[test]
fn test_equivalence () {
    let nad83 = Crs::Geographic{ epsg: 4269 };
    assert!( Crs::WGS84.is_equivalent( &nad83));
    assert!( nad83.is_equivalent( &Crs::WGS84));
    assert!( Crs::Nad83Utm{ zone: 10 }.is_equivalent( &Crs::Utm{ zone: 10, north: true }));
    assert!( Crs::Utm{ zone: 10, north: true }.is_equivalent( &Crs::Nad83Utm{ zone: 10 }));
    assert!( Crs::BcAlbers.is_equivalent( &Crs::BcAlbers));

    assert!( !Crs::Nad83Utm{ zone: 10 }.is_equivalent( &Crs::Utm{ zone: 11, north: true }));
    assert!( !Crs::Nad83Utm{ zone: 10 }.is_equivalent( &Crs::Utm{ zone: 10, north: false }));
    assert!( !Crs::WGS84.is_equivalent( &Crs::WebMercator));
    assert!( !Crs::BcAlbers.is_equivalent( &Crs::Utm{ zone: 10, north: true }));
}


#[test]
fn test_transformer () {
    let t = Transformer::new( &Crs::WGS84, &Crs::BcAlbers).unwrap();
    assert!( !t.is_identity());
    let p = t.transform( -126.0, 45.0).unwrap();
    assert!( (p.0 - 1_000_000.0).abs() < 1e-4);

    assert!( Transformer::new( &Crs::WGS84, &Crs::Geographic{ epsg: 4269 }).unwrap().is_identity());
    assert!( Transformer::new( &Crs::Nad83Utm{ zone: 10 }, &Crs::Utm{ zone: 10, north: true }).unwrap().is_identity());

    // proj strings of all supported systems are accepted
    for epsg in [4326, 4269, 3857, 3005, 32610, 32755, 26910] {
        let crs = Crs::from_epsg( epsg).unwrap();
        assert!( Transformer::new( &Crs::WGS84, &crs).is_ok(), "{}", crs.proj_string());
    }
}
