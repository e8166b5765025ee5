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
use firecomp_geo::coords::{normalize, format_degrees_minutes, CoordAxis};

define_cli! { ARGS [about="parse_coord - convert '<degrees> <minutes>' coordinates into decimal degrees"] =
    lon: bool [help="values are longitudes (negated unless explicitly signed)", long],
    values: Vec<String> [help="coordinate values, e.g. \"49 30\"", required=true, allow_hyphen_values=true]
}

fn main()->anyhow::Result<()> {
    init_tracing("warn");
    let axis = if ARGS.lon { CoordAxis::Longitude } else { CoordAxis::Latitude };

    for s in &ARGS.values {
        let deg = normalize( s, axis)?;
        println!("{s:>14} -> {deg:.6} ({})", format_degrees_minutes( deg, 3));
    }
    Ok(())
}
