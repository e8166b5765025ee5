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

//! in-memory raster grids (elevation, temperature) with their geo-reference

use ndarray::Array2;
use serde::{Serialize,Deserialize};
use firecomp_common::{BoundingBox, MinMaxAvg};

use crate::crs::Crs;
use crate::errors::{invalid_raster, Result};

/// the no-data value we use for masked cells of rasters that don't declare their own
pub const DEFAULT_NODATA: f64 = -9999.0;

/// GDAL style affine transform `[x0, dx, rx, y0, ry, dy]` mapping (fractional) grid positions
/// to crs coordinates: `x = x0 + col*dx + row*rx`, `y = y0 + col*ry + row*dy`.
/// Grid positions refer to cell corners, cell centers are at `(col+0.5, row+0.5)`
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoTransform(pub [f64;6]);

impl GeoTransform {
    /// north-up transform for the upper left corner (x0,y0) and the given positive cell sizes
    pub fn north_up (x0: f64, y0: f64, cell_width: f64, cell_height: f64)->Self {
        GeoTransform( [x0, cell_width, 0.0, y0, 0.0, -cell_height])
    }

    #[inline] pub fn x0 (&self)->f64 { self.0[0] }
    #[inline] pub fn y0 (&self)->f64 { self.0[3] }
    #[inline] pub fn dx (&self)->f64 { self.0[1] }
    #[inline] pub fn dy (&self)->f64 { self.0[5] }

    pub fn is_rotated (&self)->bool { self.0[2] != 0.0 || self.0[4] != 0.0 }

    pub fn is_valid (&self)->bool {
        self.0.iter().all(|v| v.is_finite()) && self.determinant() != 0.0
    }

    fn determinant (&self)->f64 { self.0[1] * self.0[5] - self.0[2] * self.0[4] }

    /// crs coordinates of fractional grid position
    pub fn to_crs (&self, col: f64, row: f64)->(f64,f64) {
        let t = &self.0;
        (t[0] + col*t[1] + row*t[2], t[3] + col*t[4] + row*t[5])
    }

    /// crs coordinates of the center of cell (row,col)
    pub fn cell_center (&self, row: usize, col: usize)->(f64,f64) {
        self.to_crs( col as f64 + 0.5, row as f64 + 0.5)
    }

    /// fractional grid position (col,row) of crs coordinates
    pub fn to_grid (&self, x: f64, y: f64)->(f64,f64) {
        let t = &self.0;
        let det = self.determinant();
        let dx = x - t[0];
        let dy = y - t[3];
        ((t[5]*dx - t[2]*dy) / det, (t[1]*dy - t[4]*dx) / det)
    }

    /// transform for a window of the grid starting at (row,col)
    pub fn offset (&self, row: usize, col: usize)->GeoTransform {
        let (x0,y0) = self.to_crs( col as f64, row as f64);
        let t = &self.0;
        GeoTransform( [x0, t[1], t[2], y0, t[4], t[5]])
    }
}

/// a single band raster with cell values in row major order
#[derive(Debug,Clone,PartialEq)]
pub struct RasterGrid {
    pub data: Array2<f64>,
    pub crs: Crs,
    pub transform: GeoTransform,
    pub nodata: Option<f64>,
}

impl RasterGrid {
    pub fn new (data: Array2<f64>, crs: Crs, transform: GeoTransform, nodata: Option<f64>)->Result<Self> {
        if data.is_empty() {
            return Err( invalid_raster("empty grid"))
        }
        if !transform.is_valid() {
            return Err( invalid_raster( format!("degenerate transform {:?}", transform.0)))
        }
        Ok( RasterGrid { data, crs, transform, nodata } )
    }

    /// a grid with all cells set to `value`
    pub fn filled (n_rows: usize, n_cols: usize, value: f64, crs: Crs, transform: GeoTransform, nodata: Option<f64>)->Result<Self> {
        RasterGrid::new( Array2::from_elem( (n_rows, n_cols), value), crs, transform, nodata)
    }

    #[inline] pub fn n_rows (&self)->usize { self.data.nrows() }
    #[inline] pub fn n_cols (&self)->usize { self.data.ncols() }
    pub fn shape (&self)->(usize,usize) { (self.n_rows(), self.n_cols()) }

    pub fn nodata_or_default (&self)->f64 { self.nodata.unwrap_or(DEFAULT_NODATA) }

    /// is `v` a value that represents data (not no-data and not NaN)
    pub fn is_valid (&self, v: f64)->bool {
        if v.is_nan() { return false }
        match self.nodata {
            Some(nd) => if nd.is_nan() { true } else { v != nd },
            None => true
        }
    }

    pub fn get (&self, row: usize, col: usize)->Option<f64> {
        self.data.get( (row,col)).copied().filter( |v| self.is_valid(*v))
    }

    /// value of the cell containing crs position (x,y), None if outside or no-data
    pub fn value_at (&self, x: f64, y: f64)->Option<f64> {
        let (col,row) = self.transform.to_grid( x, y);
        if !(col >= 0.0 && row >= 0.0) { return None }

        let (col,row) = (col.floor() as usize, row.floor() as usize);
        self.get( row, col)
    }

    /// crs bounds of the grid (outer cell edges)
    pub fn bounds (&self)->BoundingBox<f64> {
        let (nr,nc) = (self.n_rows() as f64, self.n_cols() as f64);
        let corners = [(0.0,0.0), (nc,0.0), (0.0,nr), (nc,nr)].map( |(c,r)| self.transform.to_crs(c,r));
        // a grid with valid transform always has finite corners
        BoundingBox::enclosing( corners).unwrap_or( BoundingBox::new( f64::NAN, f64::NAN, f64::NAN, f64::NAN))
    }

    pub fn cell_size (&self)->(f64,f64) {
        (self.transform.dx().abs(), self.transform.dy().abs())
    }

    pub fn valid_count (&self)->usize {
        self.data.iter().filter( |v| self.is_valid(**v)).count()
    }

    pub fn stats (&self)->RasterStats {
        let mut mma = MinMaxAvg::new();
        for v in self.data.iter().filter( |v| self.is_valid(**v)) {
            mma.add(*v);
        }
        RasterStats::from_mma( &mma, self.data.len())
    }
}

/// summary of valid raster cells
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RasterStats {
    pub n_cells: usize,
    pub n_valid: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl RasterStats {
    fn from_mma (mma: &MinMaxAvg, n_cells: usize)->Self {
        if mma.is_empty() {
            RasterStats { n_cells, n_valid: 0, min: None, max: None, mean: None }
        } else {
            RasterStats { n_cells, n_valid: mma.n, min: Some(mma.min), max: Some(mma.max), mean: Some(mma.avg) }
        }
    }
}
