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

//! clipping rasters to boundary polygons. Clipping is a cheap crop to the boundary extent followed
//! by a mask of all cells whose center lies outside the boundary. The crop only reduces the number
//! of cells the mask has to test, masking an uncropped raster gives the same values for the
//! cropped window

use ndarray::s;
use tracing::debug;
use firecomp_common::BoundingBox;

use crate::boundary::BoundaryPolygon;
use crate::raster::RasterGrid;
use crate::errors::{invalid_raster, FirecompGeoError, Result};

/// tolerance for grid positions that are computed from bounds which coincide with cell edges
const EDGE_EPS: f64 = 1e-9;

/// (row_start, row_end, col_start, col_end) of the cells that intersect `bbox`, clamped to the grid.
/// None if the bbox does not overlap the grid
pub fn cell_window (raster: &RasterGrid, bbox: &BoundingBox<f64>)->Option<(usize,usize,usize,usize)> {
    let t = &raster.transform;
    let corners = [(bbox.west,bbox.south), (bbox.west,bbox.north), (bbox.east,bbox.south), (bbox.east,bbox.north)]
        .map( |(x,y)| t.to_grid( x, y));

    let col_min = corners.iter().map( |p| p.0).fold( f64::INFINITY, f64::min);
    let col_max = corners.iter().map( |p| p.0).fold( f64::NEG_INFINITY, f64::max);
    let row_min = corners.iter().map( |p| p.1).fold( f64::INFINITY, f64::min);
    let row_max = corners.iter().map( |p| p.1).fold( f64::NEG_INFINITY, f64::max);

    if !(col_min.is_finite() && col_max.is_finite() && row_min.is_finite() && row_max.is_finite()) {
        return None
    }

    let clamp = |v: f64, n: usize| -> usize { v.max(0.0).min( n as f64) as usize };
    let c0 = clamp( (col_min + EDGE_EPS).floor(), raster.n_cols());
    let c1 = clamp( (col_max - EDGE_EPS).ceil(), raster.n_cols());
    let r0 = clamp( (row_min + EDGE_EPS).floor(), raster.n_rows());
    let r1 = clamp( (row_max - EDGE_EPS).ceil(), raster.n_rows());

    if c0 < c1 && r0 < r1 { Some( (r0,r1,c0,c1)) } else { None }
}

/// restrict the raster to the cells that intersect `bbox` (given in the raster crs)
pub fn crop_to_bounds (raster: &RasterGrid, bbox: &BoundingBox<f64>)->Result<RasterGrid> {
    if raster.transform.is_rotated() {
        return Err( invalid_raster("cannot crop rotated raster"))
    }

    let (r0,r1,c0,c1) = cell_window( raster, bbox)
        .ok_or_else( || FirecompGeoError::NoOverlap( format!("{bbox:?} does not overlap raster {:?}", raster.bounds())))?;

    let data = raster.data.slice( s![r0..r1, c0..c1]).to_owned();
    debug!("cropped raster from {:?} to {:?}", raster.shape(), data.dim());

    RasterGrid::new( data, raster.crs, raster.transform.offset( r0, c0), raster.nodata)
}

/// set all cells with centers outside of `boundary` to no-data. If the raster does not have a
/// no-data value yet it gets the default one
pub fn mask_outside (raster: &RasterGrid, boundary: &BoundaryPolygon)->Result<RasterGrid> {
    check_crs( raster, boundary)?;

    let nodata = raster.nodata_or_default();
    let mut masked = raster.clone();
    masked.nodata = Some(nodata);

    let mut n_masked = 0;
    for ((row,col), v) in masked.data.indexed_iter_mut() {
        let (x,y) = raster.transform.cell_center( row, col);
        if !boundary.contains( x, y) {
            *v = nodata;
            n_masked += 1;
        }
    }

    debug!("masked {n_masked} of {} cells", raster.data.len());
    Ok(masked)
}

/// crop to the boundary extent, then mask everything outside the boundary
pub fn clip (raster: &RasterGrid, boundary: &BoundaryPolygon)->Result<RasterGrid> {
    check_crs( raster, boundary)?;
    let cropped = crop_to_bounds( raster, &boundary.bounds())?;
    mask_outside( &cropped, boundary)
}

fn check_crs (raster: &RasterGrid, boundary: &BoundaryPolygon)->Result<()> {
    if !raster.crs.is_equivalent( &boundary.crs()) {
        Err( FirecompGeoError::CrsMismatch( format!("raster is {} but boundary is {}", raster.crs, boundary.crs())))
    } else {
        Ok(())
    }
}
