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

//! the spatial side of fire period comparisons: textual coordinate normalization, coordinate
//! reference systems and alignment, raster grids with GeoTIFF IO, boundary polygons and clipping

pub mod errors;
pub mod coords;
pub mod crs;
pub mod raster;
pub mod geotiff;
pub mod boundary;
pub mod clip;
pub mod align;

pub use errors::{FirecompGeoError, Result};
pub use coords::{CoordAxis, CoordPolicy, normalize_latitude, normalize_longitude};
pub use crs::{Crs, transform};
pub use raster::{GeoTransform, RasterGrid, RasterStats};
pub use boundary::BoundaryPolygon;
pub use clip::{clip, crop_to_bounds, mask_outside};
pub use align::{common_crs, reproject_raster, PointSet};
