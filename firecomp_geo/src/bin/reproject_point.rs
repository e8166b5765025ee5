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

use firecomp_common::{define_cli, logging::init_tracing};
use firecomp_geo::crs::{transform, Crs};

define_cli! { ARGS [about="reproject_point - transform a position between coordinate reference systems"] =
    src: String [help="source CRS (e.g. EPSG:4326, UTM10N)", long, default_value="EPSG:4326"],
    tgt: String [help="target CRS (e.g. EPSG:3005)", long],
    round_trip: bool [help="transform back and report the round trip error", long],
    x: f64 [help="x or longitude", allow_hyphen_values=true],
    y: f64 [help="y or latitude", allow_hyphen_values=true]
}

fn main()->anyhow::Result<()> {
    init_tracing("warn");

    let src = Crs::from_srs_spec( &ARGS.src)?;
    let tgt = Crs::from_srs_spec( &ARGS.tgt)?;

    let (x,y) = transform( &src, &tgt, ARGS.x, ARGS.y)?;
    println!("{src} ({}, {}) -> {tgt} ({x:.6}, {y:.6})", ARGS.x, ARGS.y);

    if ARGS.round_trip {
        let (x1,y1) = transform( &tgt, &src, x, y)?;
        println!("round trip error: dx={:e} dy={:e}", (x1 - ARGS.x).abs(), (y1 - ARGS.y).abs());
    }
    Ok(())
}
