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

//! descriptive statistics over f64 samples

use serde::{Serialize,Deserialize};
use crate::MinMaxAvg;

/// quantile `p` in [0,1] of an ascending sorted slice, using linear interpolation between the
/// closest ranks (h = (n-1)p). Returns None for empty input
pub fn quantile_sorted (sorted: &[f64], p: f64)->Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) { return None }

    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;

    Some( sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// sort a copy of the finite values (NaNs are ignored)
pub fn sorted_finite (values: &[f64])->Vec<f64> {
    let mut v: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    v.sort_by(|a,b| a.total_cmp(b));
    v
}

/// five number summary plus mean. All members are None if there were no (finite) samples
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct Distribution {
    pub count: usize,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl Distribution {
    pub fn from_values (values: &[f64])->Self {
        let sorted = sorted_finite( values);
        if sorted.is_empty() { return Distribution::default() }

        let mut mma = MinMaxAvg::new();
        sorted.iter().for_each(|x| mma.add(*x));

        Distribution {
            count: sorted.len(),
            min: Some(mma.min),
            q1: quantile_sorted( &sorted, 0.25),
            median: quantile_sorted( &sorted, 0.5),
            q3: quantile_sorted( &sorted, 0.75),
            max: Some(mma.max),
            mean: Some(mma.avg),
        }
    }

    pub fn is_empty (&self)->bool { self.count == 0 }

    /// inter quartile range
    pub fn iqr (&self)->Option<f64> {
        match (self.q1, self.q3) {
            (Some(q1),Some(q3)) => Some(q3 - q1),
            _ => None
        }
    }
}
