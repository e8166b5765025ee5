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

//! degree angle helpers. Normalizing functions wrap values into their canonical range, the
//! `is_valid_..` predicates are used where wrapping would hide bad input (e.g. parsed coordinates)

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn is_valid_latitude (d: f64)->bool { d.is_finite() && d >= -90.0 && d <= 90.0 }

#[inline]
pub fn is_valid_longitude (d: f64)->bool { d.is_finite() && d >= -180.0 && d <= 180.0 }

/// smallest absolute difference between two longitudes in degrees (handles the antimeridian)
pub fn longitude_delta (a: f64, b: f64)->f64 {
    normalize_180( a - b).abs()
}
