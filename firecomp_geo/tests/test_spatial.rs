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

use geo::{LineString, Polygon};
use ndarray::Array2;
use uom::si::area::{square_meter, square_kilometer};
use firecomp_common::BoundingBox;
use firecomp_geo::{
    FirecompGeoError,
    align::{common_crs, reproject_raster, PointSet},
    boundary::BoundaryPolygon,
    crs::Crs,
    geotiff::{read_geotiff, write_geotiff},
    raster::{GeoTransform, RasterGrid}
};

/// run with "cargo test -p firecomp_geo --test test_spatial -- --nocapture"

const BOUNDARY_JSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature",
      "properties": { "name": "test region" },
      "geometry": { "type": "Polygon", "coordinates": [[ [-124.0,49.0], [-122.0,49.0], [-122.0,50.5], [-124.0,50.5], [-124.0,49.0] ]] }
    },
    { "type": "Feature",
      "properties": { "name": "marker" },
      "geometry": { "type": "Point", "coordinates": [-123.0, 49.5] }
    }
  ]
}"#;

fn polygon (coords: Vec<(f64,f64)>)->Polygon<f64> {
    Polygon::new( LineString::from( coords), vec![])
}

#[test]
fn test_geojson_boundary () {
    let boundary = BoundaryPolygon::from_geojson_str( BOUNDARY_JSON, Crs::WGS84).unwrap();
    assert_eq!( boundary.crs(), Crs::WGS84);
    assert_eq!( boundary.polygons().0.len(), 1);
    assert_eq!( boundary.bounds(), BoundingBox::new( -124.0, 49.0, -122.0, 50.5));

    assert!( boundary.contains( -123.0, 49.5));
    assert!( !boundary.contains( -125.0, 49.5));
    assert!( !boundary.contains( -123.0, 51.0));

    let km2 = boundary.area().get::<square_kilometer>();
    println!("area: {km2} km²");
    assert!( km2 > 20_000.0 && km2 < 25_000.0);
}

#[test]
fn test_legacy_crs_member () {
    let src = r#"{ "type": "FeatureCollection",
      "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::3005" } },
      "features": [ { "type": "Feature", "properties": {},
         "geometry": { "type": "Polygon", "coordinates": [[ [0,0], [1000,0], [1000,1000], [0,1000], [0,0] ]] } } ] }"#;
    let boundary = BoundaryPolygon::from_geojson_str( src, Crs::WGS84).unwrap();
    assert_eq!( boundary.crs(), Crs::BcAlbers);
    assert!( (boundary.area().get::<square_meter>() - 1_000_000.0).abs() < 1e-6);
}

#[test]
fn test_invalid_geometry () {
    let bowtie = polygon( vec![ (0.0,0.0), (2.0,2.0), (2.0,0.0), (0.0,2.0), (0.0,0.0) ]);
    let res = BoundaryPolygon::from_polygon( bowtie, Crs::BcAlbers);
    println!("bowtie: {res:?}");
    assert!( matches!( res, Err(FirecompGeoError::InvalidGeometry(_))));

    let flat = polygon( vec![ (0.0,0.0), (1.0,1.0), (2.0,2.0), (0.0,0.0) ]);
    assert!( matches!( BoundaryPolygon::from_polygon( flat, Crs::BcAlbers), Err(FirecompGeoError::InvalidGeometry(_))));

    let short = polygon( vec![ (0.0,0.0), (1.0,0.0) ]);
    assert!( BoundaryPolygon::from_polygon( short, Crs::BcAlbers).is_err());

    let no_polygons = r#"{ "type": "Point", "coordinates": [-123.0, 49.5] }"#;
    assert!( BoundaryPolygon::from_geojson_str( no_polygons, Crs::WGS84).is_err());
    assert!( BoundaryPolygon::from_geojson_str( "{ not json", Crs::WGS84).is_err());

    let square = polygon( vec![ (0.0,0.0), (2.0,0.0), (2.0,2.0), (0.0,2.0), (0.0,0.0) ]);
    assert!( BoundaryPolygon::from_polygon( square, Crs::BcAlbers).is_ok());
}

#[test]
fn test_boundary_reprojection () {
    let boundary = BoundaryPolygon::from_geojson_str( BOUNDARY_JSON, Crs::WGS84).unwrap();
    let albers = boundary.reproject( &Crs::BcAlbers).unwrap();
    assert_eq!( albers.crs(), Crs::BcAlbers);

    let (x,y) = Crs::BcAlbers.from_geographic( -123.0, 49.5).unwrap();
    assert!( albers.contains( x, y));

    let back = albers.reproject( &Crs::WGS84).unwrap();
    let (b0, b1) = (boundary.bounds(), back.bounds());
    for (a,b) in b0.to_wsen_array().iter().zip( b1.to_wsen_array().iter()) {
        assert!( (a - b).abs() < 1e-6);
    }
}

#[test]
fn test_points () {
    let pts = PointSet::from_lon_lat( vec![ (0, -123.0, 49.5), (3, -125.5, 49.2), (7, -122.1, 50.4) ]);
    let albers = pts.reproject( &Crs::BcAlbers).unwrap();
    assert_eq!( albers.len(), 3);
    assert_eq!( albers.points[1].index, 3);

    let back = albers.reproject( &Crs::WGS84).unwrap();
    for (p,q) in pts.points.iter().zip( back.points.iter()) {
        assert!( (p.x - q.x).abs() < 1e-6 && (p.y - q.y).abs() < 1e-6);
    }

    let boundary = BoundaryPolygon::from_geojson_str( BOUNDARY_JSON, Crs::WGS84).unwrap();
    let inside = albers.within( &boundary).unwrap();
    assert_eq!( inside.crs, Crs::BcAlbers);
    assert_eq!( inside.points.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0,7]);

    let mut far = PointSet::new( Crs::WGS84);
    far.push( 0, 60.0, 49.0);
    assert!( far.reproject( &Crs::Utm{ zone: 10, north: true }).is_err());
}

#[test]
fn test_within_keeps_coordinates () {
    let pts = PointSet::from_lon_lat( vec![ (0, -123.123456789, 49.987654321), (1, -125.5, 49.2), (2, -122.456789012, 50.2) ]);
    let boundary = BoundaryPolygon::from_geojson_str( BOUNDARY_JSON, Crs::WGS84).unwrap().reproject( &Crs::BcAlbers).unwrap();

    let inside = pts.within( &boundary).unwrap();
    assert_eq!( inside.crs, Crs::WGS84);
    assert_eq!( inside.points, vec![ pts.points[0], pts.points[2] ]);
    assert_eq!( inside.points[0].y, 49.987654321);

    // equivalent crs does not need any transformation
    let nad83 = BoundaryPolygon::from_geojson_str( BOUNDARY_JSON, Crs::Geographic{ epsg: 4269 }).unwrap();
    assert_eq!( pts.within( &nad83).unwrap().points, inside.points);
}

#[test]
fn test_nad83_utm_geotiff () {
    let crs = Crs::Nad83Utm{ zone: 10 };
    let data = Array2::from_shape_fn( (3,4), |(r,c)| (r*4 + c) as f64);
    let raster = RasterGrid::new( data, crs, GeoTransform::north_up( 500_000.0, 5_500_000.0, 30.0, 30.0), None).unwrap();

    let path = std::env::temp_dir().join("firecomp_test_nad83_utm.tif");
    write_geotiff( &raster, &path).unwrap();
    let r = read_geotiff( &path).unwrap();
    assert_eq!( r.crs, crs);
    assert_eq!( r.crs.epsg(), 26910);

    let utm = reproject_raster( &r, &Crs::Utm{ zone: 10, north: true }, None).unwrap();
    assert_eq!( utm.data, r.data);
    let _ = std::fs::remove_file( path);
}

/// 5x5 geographic raster with 0.1° cells, upper left at (-124,50)
fn geo_raster ()->RasterGrid {
    let data = Array2::from_shape_fn( (5,5), |(r,c)| (r*10 + c) as f64);
    RasterGrid::new( data, Crs::WGS84, GeoTransform::north_up( -124.0, 50.0, 0.1, 0.1), Some(-1.0)).unwrap()
}

#[test]
fn test_sample () {
    let raster = geo_raster();
    let pts = PointSet::from_lon_lat( vec![ (0, -123.95, 49.95), (1, -123.75, 49.65), (2, -120.0, 49.0) ]);

    assert_eq!( pts.sample( &raster).unwrap(), vec![ (0, 0.0), (1, 32.0) ]);
    assert_eq!( pts.reproject( &Crs::BcAlbers).unwrap().sample( &raster).unwrap(), vec![ (0, 0.0), (1, 32.0) ]);
}

#[test]
fn test_common_crs () {
    let raster = geo_raster();
    let boundary = BoundaryPolygon::from_bbox( &BoundingBox::new( 0.0, 0.0, 10.0, 10.0), Crs::BcAlbers).unwrap();
    let utm = Crs::Utm{ zone: 10, north: true };

    assert_eq!( common_crs( Some(utm), &[&raster], Some(&boundary)), utm);
    assert_eq!( common_crs( None, &[&raster], Some(&boundary)), Crs::WGS84);
    assert_eq!( common_crs( None, &[], Some(&boundary)), Crs::BcAlbers);
    assert_eq!( common_crs( None, &[], None), Crs::WGS84);
}

#[test]
fn test_reproject_raster () {
    let raster = geo_raster();
    let warped = reproject_raster( &raster, &Crs::BcAlbers, Some(500.0)).unwrap();

    assert_eq!( warped.crs, Crs::BcAlbers);
    assert_eq!( warped.nodata, Some(-1.0));
    assert!( warped.valid_count() > 0);

    // nearest neighbour preserves values at source cell centers
    for (r,c) in [(0,0), (2,2), (4,1), (1,4)] {
        let (lon,lat) = raster.transform.cell_center( r, c);
        let (x,y) = Crs::BcAlbers.from_geographic( lon, lat).unwrap();
        assert_eq!( warped.value_at( x, y), raster.get( r, c));
    }

    let same = reproject_raster( &raster, &Crs::WGS84, None).unwrap();
    assert_eq!( same, raster);
}

#[test]
fn test_geotiff_round_trip () {
    let dir = std::env::temp_dir();

    let data = Array2::from_shape_fn( (6,8), |(r,c)| if r == c { -9999.0 } else { (r*8 + c) as f64 * 1.5 });
    let raster = RasterGrid::new( data, Crs::BcAlbers, GeoTransform::north_up( 1_200_000.0, 500_000.0, 100.0, 100.0), Some(-9999.0)).unwrap();
    let path = dir.join("firecomp_test_albers.tif");
    write_geotiff( &raster, &path).unwrap();

    let r = read_geotiff( &path).unwrap();
    assert_eq!( r, raster);
    assert_eq!( r.valid_count(), 48 - 6);

    let raster = geo_raster();
    let raster = RasterGrid { nodata: None, ..raster };
    let path = dir.join("firecomp_test_wgs84.tif");
    write_geotiff( &raster, &path).unwrap();
    let r = read_geotiff( &path).unwrap();
    assert_eq!( r.crs, Crs::WGS84);
    assert_eq!( r.nodata, None);
    assert_eq!( r.data, raster.data);
    for (a,b) in r.transform.0.iter().zip( raster.transform.0.iter()) {
        assert!( (a - b).abs() < 1e-12);
    }

    let _ = std::fs::remove_file( dir.join("firecomp_test_albers.tif"));
    let _ = std::fs::remove_file( path);
}
