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

use std::path::PathBuf;
use anyhow::anyhow;
use tracing::info;
use firecomp_common::{define_cli, fs::filestem, logging::init_tracing};
use firecomp_geo::{boundary::BoundaryPolygon, clip::clip, crs::Crs, geotiff::{read_geotiff, write_geotiff}};

define_cli! { ARGS [about="clip_raster - clip a GeoTIFF raster to a GeoJSON boundary"] =
    boundary_crs: String [help="CRS of the boundary if the GeoJSON does not declare one", long, default_value="EPSG:4326"],
    output: Option<PathBuf> [help="output file (default <raster>_clipped.tif)", short, long],
    raster: PathBuf [help="GeoTIFF input raster"],
    boundary: PathBuf [help="GeoJSON boundary"]
}

fn main()->anyhow::Result<()> {
    init_tracing("info");

    let raster = read_geotiff( &ARGS.raster)?;
    let boundary = BoundaryPolygon::from_geojson_file( &ARGS.boundary, Crs::from_srs_spec( &ARGS.boundary_crs)?)?
        .reproject( &raster.crs)?;

    let clipped = clip( &raster, &boundary)?;
    let stats = clipped.stats();
    info!("clipped raster has {} of {} valid cells", stats.n_valid, stats.n_cells);

    let output = match &ARGS.output {
        Some(path) => path.clone(),
        None => {
            let stem = filestem( &ARGS.raster).ok_or_else( || anyhow!("invalid raster filename {:?}", ARGS.raster))?;
            ARGS.raster.with_file_name( format!("{stem}_clipped.tif"))
        }
    };
    write_geotiff( &clipped, &output)?;
    println!("clipped raster written to {output:?} (min={:?}, max={:?}, mean={:?})", stats.min, stats.max, stats.mean);
    Ok(())
}
