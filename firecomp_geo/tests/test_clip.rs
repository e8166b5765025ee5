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
use ndarray::{s, Array2};
use firecomp_common::BoundingBox;
use firecomp_geo::{
    FirecompGeoError,
    boundary::BoundaryPolygon,
    clip::{cell_window, clip, crop_to_bounds, mask_outside},
    crs::Crs,
    raster::{GeoTransform, RasterGrid, DEFAULT_NODATA}
};

/// run with "cargo test -p firecomp_geo --test test_clip -- --nocapture"

/// 20x20 grid with 1m cells covering [-5,15]x[-5,15], cell values are row*100 + col
fn test_raster (nodata: Option<f64>)->RasterGrid {
    let data = Array2::from_shape_fn( (20,20), |(r,c)| (r*100 + c) as f64);
    RasterGrid::new( data, Crs::BcAlbers, GeoTransform::north_up( -5.0, 15.0, 1.0, 1.0), nodata).unwrap()
}

/// diamond around (5,5) with radius 4.2
fn diamond ()->BoundaryPolygon {
    let ring = LineString::from( vec![ (5.0,0.8), (9.2,5.0), (5.0,9.2), (0.8,5.0), (5.0,0.8) ]);
    BoundaryPolygon::from_polygon( Polygon::new( ring, vec![]), Crs::BcAlbers).unwrap()
}

#[test]
fn test_window () {
    let raster = test_raster(None);
    assert_eq!( cell_window( &raster, &diamond().bounds()), Some((5,15,5,15)));
    assert_eq!( cell_window( &raster, &BoundingBox::new( -100.0, -100.0, 100.0, 100.0)), Some((0,20,0,20)));
    assert_eq!( cell_window( &raster, &BoundingBox::new( 20.0, 20.0, 30.0, 30.0)), None);
}

#[test]
fn test_crop () {
    let raster = test_raster(None);
    let cropped = crop_to_bounds( &raster, &BoundingBox::new( 0.0, 0.0, 10.0, 10.0)).unwrap();

    assert_eq!( cropped.shape(), (10,10));
    assert_eq!( cropped.transform, GeoTransform::north_up( 0.0, 10.0, 1.0, 1.0));
    assert_eq!( cropped.get(0,0), Some(505.0));
    assert_eq!( cropped.bounds(), BoundingBox::new( 0.0, 0.0, 10.0, 10.0));
    assert_eq!( cropped.value_at( 0.5, 9.5), raster.value_at( 0.5, 9.5));

    let res = crop_to_bounds( &raster, &BoundingBox::new( 100.0, 100.0, 110.0, 110.0));
    assert!( matches!( res, Err(FirecompGeoError::NoOverlap(_))));
}

#[test]
fn test_clip () {
    let raster = test_raster(None);
    let clipped = clip( &raster, &diamond()).unwrap();

    assert_eq!( clipped.shape(), (10,10));
    assert_eq!( clipped.nodata, Some(DEFAULT_NODATA));
    assert_eq!( clipped.valid_count(), 40);

    // cell centers inside the diamond keep their values, others are no-data
    for ((r,c),v) in clipped.data.indexed_iter() {
        let inside = (c as f64 - 4.5).abs() + (r as f64 - 4.5).abs() < 4.2;
        if inside {
            assert_eq!( *v, ((r+5)*100 + c + 5) as f64);
        } else {
            assert_eq!( *v, DEFAULT_NODATA);
        }
    }

    let stats = clipped.stats();
    assert_eq!( stats.n_valid, 40);
    assert_eq!( stats.n_cells, 100);
    assert_eq!( stats.min, Some(609.0));  // window row 1, cols 4/5
    assert_eq!( stats.max, Some(1310.0));
}

#[test]
fn test_clip_keeps_declared_nodata () {
    let clipped = clip( &test_raster(Some(-1.0)), &diamond()).unwrap();
    assert_eq!( clipped.nodata, Some(-1.0));
    assert_eq!( clipped.data.iter().filter( |v| **v == -1.0).count(), 60);
}

#[test]
fn test_idempotent () {
    let raster = test_raster(None);
    let boundary = diamond();
    let clipped = clip( &raster, &boundary).unwrap();

    assert_eq!( clip( &clipped, &boundary).unwrap(), clipped);

    let larger = BoundaryPolygon::from_bbox( &BoundingBox::new( -1.0, -1.0, 11.0, 11.0), Crs::BcAlbers).unwrap();
    assert_eq!( clip( &clipped, &larger).unwrap(), clipped);
}

#[test]
fn test_mask_without_crop () {
    let raster = test_raster(None);
    let boundary = diamond();

    let clipped = clip( &raster, &boundary).unwrap();
    let masked = mask_outside( &raster, &boundary).unwrap();

    assert_eq!( masked.shape(), raster.shape());
    assert_eq!( masked.valid_count(), clipped.valid_count());
    assert_eq!( masked.data.slice( s![5..15, 5..15]), clipped.data);
}

#[test]
fn test_crs_mismatch () {
    let raster = test_raster(None);
    let boundary = BoundaryPolygon::from_bbox( &BoundingBox::new( -124.0, 49.0, -123.0, 50.0), Crs::WGS84).unwrap();

    assert!( matches!( clip( &raster, &boundary), Err(FirecompGeoError::CrsMismatch(_))));
    assert!( matches!( mask_outside( &raster, &boundary), Err(FirecompGeoError::CrsMismatch(_))));
}

#[test]
fn test_geographic_datums_are_compatible () {
    // 10x10 WGS84 raster with 0.1° cells, upper left at (-124,50)
    let data = Array2::from_shape_fn( (10,10), |(r,c)| (r*10 + c) as f64);
    let raster = RasterGrid::new( data, Crs::WGS84, GeoTransform::north_up( -124.0, 50.0, 0.1, 0.1), None).unwrap();
    let nad83 = Crs::Geographic{ epsg: 4269 };
    let boundary = BoundaryPolygon::from_bbox( &BoundingBox::new( -123.82, 49.38, -123.38, 49.82), nad83).unwrap();

    let clipped = clip( &raster, &boundary).unwrap();
    assert_eq!( clipped.crs, Crs::WGS84);
    assert_eq!( clipped.shape(), (6,6));
    assert_eq!( clipped.valid_count(), 16);

    let stats = clipped.stats();
    assert_eq!( stats.min, Some(22.0));
    assert_eq!( stats.max, Some(55.0));

    assert_eq!( mask_outside( &raster, &boundary).unwrap().valid_count(), 16);
}

#[test]
fn test_rotated () {
    let data = Array2::from_elem( (4,4), 1.0);
    let raster = RasterGrid::new( data, Crs::BcAlbers, GeoTransform([0.0, 1.0, 0.1, 4.0, 0.1, -1.0]), None).unwrap();
    let res = crop_to_bounds( &raster, &BoundingBox::new( 0.0, 0.0, 2.0, 2.0));
    assert!( matches!( res, Err(FirecompGeoError::InvalidRaster(_))));
}
