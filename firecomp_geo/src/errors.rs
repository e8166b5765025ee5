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

use firecomp_common::define_error;

pub type Result<T> = std::result::Result<T, FirecompGeoError>;

define_error!{ pub FirecompGeoError =
    IOError( #[from] std::io::Error) : "IO error: {0}",
    TiffError( #[from] tiff::TiffError) : "TIFF error: {0}",
    GeoJsonError( #[from] geojson::Error) : "GeoJSON error: {0}",
    MalformedCoordinate(String) : "malformed coordinate: {0}",
    UnsupportedCrs(String) : "unsupported coordinate reference system: {0}",
    OutOfDomain(String) : "position outside of projection domain: {0}",
    CrsMismatch(String) : "coordinate reference system mismatch: {0}",
    InvalidGeometry(String) : "invalid geometry: {0}",
    InvalidRaster(String) : "invalid raster: {0}",
    NoOverlap(String) : "no overlap: {0}"
}

pub fn malformed<S: ToString> (msg: S)->FirecompGeoError {
    FirecompGeoError::MalformedCoordinate(msg.to_string())
}

pub fn out_of_domain<S: ToString> (msg: S)->FirecompGeoError {
    FirecompGeoError::OutOfDomain(msg.to_string())
}

pub fn invalid_raster<S: ToString> (msg: S)->FirecompGeoError {
    FirecompGeoError::InvalidRaster(msg.to_string())
}

pub fn invalid_geometry<S: ToString> (msg: S)->FirecompGeoError {
    FirecompGeoError::InvalidGeometry(msg.to_string())
}
