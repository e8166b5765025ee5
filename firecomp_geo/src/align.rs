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

//! resolving point sets, boundaries and rasters into one common crs

use ndarray::Array2;
use serde::{Serialize,Deserialize};
use tracing::{debug,info};
use firecomp_common::BoundingBox;

use crate::boundary::BoundaryPolygon;
use crate::crs::{Crs, Transformer};
use crate::raster::{GeoTransform, RasterGrid};
use crate::errors::{invalid_raster, Result};

/// number of points per raster edge we transform to find the target extent
const EDGE_SAMPLES: usize = 32;

/// a point that remembers which record it came from
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct IndexedPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// points with a declared crs
#[derive(Debug,Clone,PartialEq)]
pub struct PointSet {
    pub crs: Crs,
    pub points: Vec<IndexedPoint>,
}

impl PointSet {
    pub fn new (crs: Crs)->Self {
        PointSet { crs, points: Vec::new() }
    }

    /// attach WGS84 to (index, lon, lat) tuples
    pub fn from_lon_lat<I> (pts: I)->Self where I: IntoIterator<Item=(usize,f64,f64)> {
        let points = pts.into_iter().map( |(index,x,y)| IndexedPoint{index,x,y}).collect();
        PointSet { crs: Crs::WGS84, points }
    }

    pub fn push (&mut self, index: usize, x: f64, y: f64) {
        self.points.push( IndexedPoint{index,x,y});
    }

    pub fn len (&self)->usize { self.points.len() }
    pub fn is_empty (&self)->bool { self.points.is_empty() }

    /// transform all points into `tgt`. Fails on the first point outside of the target domain
    pub fn reproject (&self, tgt: &Crs)->Result<PointSet> {
        let transformer = Transformer::new( &self.crs, tgt)?;
        let points = self.points.iter()
            .map( |p| transformer.transform( p.x, p.y).map( |(x,y)| IndexedPoint{ index: p.index, x, y }))
            .collect::<Result<Vec<IndexedPoint>>>()?;

        Ok( PointSet { crs: *tgt, points } )
    }

    /// the points that are inside the boundary. Points keep their original coordinates, the boundary
    /// crs is only used for the containment test
    pub fn within (&self, boundary: &BoundaryPolygon)->Result<PointSet> {
        let points = if boundary.crs().is_equivalent( &self.crs) {
            self.points.iter().filter( |p| boundary.contains( p.x, p.y)).copied().collect()
        } else {
            let projected = self.reproject( &boundary.crs())?;
            self.points.iter().zip( projected.points.iter())
                .filter( |(_,q)| boundary.contains( q.x, q.y))
                .map( |(p,_)| *p)
                .collect()
        };
        Ok( PointSet { crs: self.crs, points } )
    }

    /// raster values at each point location as (record index, value) pairs. Points outside of the
    /// raster or on no-data cells are skipped
    pub fn sample (&self, raster: &RasterGrid)->Result<Vec<(usize,f64)>> {
        let transformer = Transformer::new( &self.crs, &raster.crs)?;
        let mut values = Vec::with_capacity( self.points.len());
        for p in &self.points {
            let (x,y) = transformer.transform( p.x, p.y)?;
            if let Some(v) = raster.value_at( x, y) {
                values.push( (p.index, v));
            }
        }
        Ok(values)
    }
}

/// the crs all datasets are resolved into: a configured target, or the crs of the first raster, or
/// the crs of the boundary. WGS84 if there is nothing to go by
pub fn common_crs (target: Option<Crs>, rasters: &[&RasterGrid], boundary: Option<&BoundaryPolygon>)->Crs {
    target
        .or_else( || rasters.first().map( |r| r.crs))
        .or_else( || boundary.map( |b| b.crs()))
        .unwrap_or( Crs::WGS84)
}

/// target crs bounds of the source raster extent, computed from densified edges
fn transformed_bounds (raster: &RasterGrid, transformer: &Transformer)->Result<BoundingBox<f64>> {
    let (nr,nc) = (raster.n_rows() as f64, raster.n_cols() as f64);
    let mut pts: Vec<(f64,f64)> = Vec::with_capacity( 4*(EDGE_SAMPLES+1));

    for i in 0..=EDGE_SAMPLES {
        let f = i as f64 / EDGE_SAMPLES as f64;
        for (c,r) in [(f*nc, 0.0), (f*nc, nr), (0.0, f*nr), (nc, f*nr)] {
            let (x,y) = raster.transform.to_crs( c, r);
            if let Ok(p) = transformer.transform( x, y) { pts.push(p) }
        }
    }

    BoundingBox::enclosing( pts).ok_or_else( || invalid_raster("raster extent cannot be transformed into target crs"))
}

/// nearest neighbour warp of `raster` onto a north-up grid in `tgt`. The cell size is either given
/// or chosen so that the target grid has about as many cells as the source
pub fn reproject_raster (raster: &RasterGrid, tgt: &Crs, cell_size: Option<f64>)->Result<RasterGrid> {
    if raster.crs.is_equivalent( tgt) {
        let mut same = raster.clone();
        same.crs = *tgt;
        return Ok( same)
    }

    let fwd = Transformer::new( &raster.crs, tgt)?;
    let inv = Transformer::new( tgt, &raster.crs)?;

    let bbox = transformed_bounds( raster, &fwd)?;
    let cell_size = match cell_size {
        Some(cs) if cs > 0.0 => cs,
        _ => ((bbox.width() * bbox.height()) / raster.data.len() as f64).sqrt()
    };
    if !(cell_size > 0.0 && cell_size.is_finite()) {
        return Err( invalid_raster( format!("invalid target cell size {cell_size}")))
    }

    let n_cols = ((bbox.width() / cell_size).ceil() as usize).max(1);
    let n_rows = ((bbox.height() / cell_size).ceil() as usize).max(1);
    let transform = GeoTransform::north_up( bbox.west, bbox.north, cell_size, cell_size);
    let nodata = raster.nodata_or_default();

    let mut n_valid = 0;
    let data = Array2::from_shape_fn( (n_rows, n_cols), |(row,col)| {
        let (x,y) = transform.cell_center( row, col);
        match inv.transform( x, y).ok().and_then( |(sx,sy)| raster.value_at( sx, sy)) {
            Some(v) => { n_valid += 1; v }
            None => nodata
        }
    });

    debug!("warped {:?} raster into {n_cols}x{n_rows} grid with {n_valid} valid cells", raster.shape());
    info!("reprojected raster from {} to {}", raster.crs, tgt);
    RasterGrid::new( data, *tgt, transform, Some(nodata))
}
