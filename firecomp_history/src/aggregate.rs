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

//! grouping of fires by month, year or period with count and size distribution per group

use std::collections::BTreeMap;
use serde::{Serialize,Deserialize};
use firecomp_common::{datetime::month_key, stats::Distribution};

use crate::record::FireRecord;
use crate::reconcile::PeriodSample;

/// for aggregations that don't need zero filled groups
pub const NO_EXPECTED_KEYS: &[&str] = &[];

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum GroupKey {
    Month,
    Year,
    Period,
}

/// something that can be grouped and has a size
pub trait Groupable {
    /// the group of this item for `key`, None if the item does not have that key
    fn group (&self, key: GroupKey)->Option<String>;
    fn size (&self)->f64;
}

impl Groupable for FireRecord {
    fn group (&self, key: GroupKey)->Option<String> {
        match key {
            GroupKey::Month => Some( self.month_key()),
            GroupKey::Year => Some( self.year.to_string()),
            GroupKey::Period => None
        }
    }
    fn size (&self)->f64 { self.size_hectares }
}

impl Groupable for PeriodSample {
    fn group (&self, key: GroupKey)->Option<String> {
        match key {
            GroupKey::Month => self.month.map( month_key),
            GroupKey::Year => self.year.map( |y| y.to_string()),
            GroupKey::Period => Some( self.period.clone())
        }
    }
    fn size (&self)->f64 { self.size_hectares }
}

/// count and size distribution of one group. Statistics are None for empty groups
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl GroupSummary {
    pub fn new (key: impl ToString, values: &[f64])->Self {
        let d = Distribution::from_values( values);
        GroupSummary {
            key: key.to_string(),
            count: d.count,
            min: d.min, q1: d.q1, median: d.median, q3: d.q3, max: d.max, mean: d.mean
        }
    }

    pub fn empty (key: impl ToString)->Self {
        GroupSummary::new( key, &[])
    }
}

/// summarize (group,value) pairs. Every expected key gets a summary even if it has no values,
/// results are ordered by key
pub fn summarize_groups<I,S> (pairs: I, expected_keys: &[S])->Vec<GroupSummary> 
    where I: IntoIterator<Item=(String,f64)>, S: AsRef<str>
{
    let mut groups: BTreeMap<String,Vec<f64>> = BTreeMap::new();
    for k in expected_keys {
        groups.entry( k.as_ref().to_string()).or_default();
    }
    for (k,v) in pairs {
        groups.entry(k).or_default().push(v);
    }

    groups.into_iter().map( |(k,values)| GroupSummary::new( k, &values)).collect()
}

/// group `items` by `key`. Items that don't have the key are ignored
pub fn aggregate<T: Groupable, S: AsRef<str>> (items: &[T], key: GroupKey, expected_keys: &[S])->Vec<GroupSummary> {
    summarize_groups( items.iter().filter_map( |it| it.group(key).map( |g| (g, it.size()))), expected_keys)
}

/// the summary for a given key
pub fn find_group<'a> (summaries: &'a [GroupSummary], key: &str)->Option<&'a GroupSummary> {
    summaries.iter().find( |s| s.key == key)
}

/// fire counts per month of interest (rows) and period (columns)
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct MonthlyComparison {
    pub periods: Vec<String>,
    pub rows: Vec<MonthlyCounts>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct MonthlyCounts {
    pub month: String,
    /// one count per period, in the order of [`MonthlyComparison::periods`]
    pub counts: Vec<usize>,
}

impl MonthlyComparison {
    pub fn count (&self, month: u32, period: &str)->Option<usize> {
        let col = self.periods.iter().position( |p| p == period)?;
        let mk = month_key( month);
        self.rows.iter().find( |r| r.month == mk).map( |r| r.counts[col])
    }
}

/// month x period count matrix for the given months, zero filled
pub fn compare_monthly<S: AsRef<str>> (samples: &[PeriodSample], months: &[u32], periods: &[S])->MonthlyComparison {
    let periods: Vec<String> = periods.iter().map( |p| p.as_ref().to_string()).collect();
    let rows = months.iter().map( |m| {
        let counts = periods.iter().map( |p| {
            samples.iter().filter( |s| s.month == Some(*m) && &s.period == p).count()
        }).collect();
        MonthlyCounts { month: month_key(*m), counts }
    }).collect();

    MonthlyComparison { periods, rows }
}
