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
use firecomp_common::{define_cli, logging::init_tracing};
use firecomp_history::{load_firecomp_config, ComparisonPipeline};

define_cli! { ARGS [about="compare_fires - compare wildfire counts and sizes between periods"] =
    output: Option<PathBuf> [help="output directory (overrides config)", short, long],
    config: PathBuf [help="path to RON config file", default_value="firecomp.ron"]
}

fn main()->anyhow::Result<()> {
    init_tracing("info");

    let mut config = load_firecomp_config( &ARGS.config)?;
    if let Some(output) = &ARGS.output {
        config.output_dir = output.clone();
    }

    let pipeline = ComparisonPipeline::new( config)?;
    let summary = pipeline.run()?;

    println!("fires per period (common crs {}):", summary.crs);
    for g in &summary.period_sizes {
        let median = g.median.map( |m| format!("{m:.1}")).unwrap_or_else( || "-".into());
        println!("  {:>12}: {:6} fires, median size {median} ha", g.key, g.count);
    }
    println!("outputs written to {:?}", pipeline.config().output_dir);
    Ok(())
}
