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

//! common types and ambient infrastructure (errors, configs, logging, stats) for the firecomp crates

use serde::{Serialize,Deserialize};
use num::{Num,ToPrimitive};

pub mod macros;
pub mod errors;
pub mod angle;
pub mod config;
pub mod logging;
pub mod datetime;
pub mod stats;
pub mod fs;

pub use errors::{CommonError,Result};
pub use config::load_config;

/// a generic bounding box without semantics for the coordinate type
/// (degrees for geographic reference systems, meters for projected ones)
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy + PartialOrd + ToPrimitive> BoundingBox<T> {
    pub fn new (west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north}
    }

    pub fn to_wsen_array (&self) -> [T;4] {
        [self.west,self.south,self.east,self.north]
    }

    pub fn width (&self)->T { self.east - self.west }
    pub fn height (&self)->T { self.north - self.south }

    pub fn is_empty (&self)->bool { !(self.west < self.east && self.south < self.north) }

    /// does `other` lie completely within self (inclusive edges)
    pub fn contains (&self, other: &BoundingBox<T>)->bool {
        other.west >= self.west && other.east <= self.east && other.south >= self.south && other.north <= self.north
    }

    pub fn intersection (&self, other: &BoundingBox<T>)->Option<BoundingBox<T>> {
        let west = if self.west > other.west { self.west } else { other.west };
        let south = if self.south > other.south { self.south } else { other.south };
        let east = if self.east < other.east { self.east } else { other.east };
        let north = if self.north < other.north { self.north } else { other.north };

        let bbox = BoundingBox{ west, south, east, north };
        if bbox.is_empty() { None } else { Some(bbox) }
    }
}

impl BoundingBox<f64> {
    /// smallest box that contains all given (x,y) points. None if there are no finite points
    pub fn enclosing<I> (pts: I)->Option<BoundingBox<f64>> where I: IntoIterator<Item=(f64,f64)> {
        let mut bbox: Option<BoundingBox<f64>> = None;

        for (x,y) in pts.into_iter().filter(|(x,y)| x.is_finite() && y.is_finite()) {
            bbox = match bbox {
                None => Some( BoundingBox::new( x, y, x, y)),
                Some(b) => Some( BoundingBox::new( b.west.min(x), b.south.min(y), b.east.max(x), b.north.max(y)))
            }
        }
        bbox
    }
}

/// a simple incremental min/max/avg accumulator
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: f64::NAN } }

    /// add a new observation
    pub fn add (&mut self, x: f64) {
        self.n += 1;

        if self.n > 1 {
            self.avg = self.avg + (x - self.avg) / self.n as f64;
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
    }

    pub fn is_empty (&self)->bool { self.n == 0 }
}

impl Default for MinMaxAvg {
    fn default()->Self { MinMaxAvg::new() }
}
