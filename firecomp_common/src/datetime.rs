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

use chrono::{NaiveDate,NaiveDateTime};

/// the date formats we try (in this order) if a source does not specify its own
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%m/%d/%Y",
];

/// parse a calendar date from `s` by trying `formats` in order. Trailing time-of-day parts
/// ("2013-07-04 14:20:00", "2013-07-04T14:20") are accepted and ignored
pub fn parse_naive_date<S: AsRef<str>> (s: &str, formats: &[S]) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() { return None }

    for fmt in formats {
        let fmt = fmt.as_ref();
        if let Ok(d) = NaiveDate::parse_from_str( s, fmt) {
            return Some(d)
        }
        // the date might be followed by a time spec
        if let Ok((d,rest)) = NaiveDate::parse_and_remainder( s, fmt) {
            if rest.starts_with(' ') || rest.starts_with('T') {
                return Some(d)
            }
        }
    }

    // last resort - full timestamp formats
    NaiveDateTime::parse_from_str( s, "%Y-%m-%dT%H:%M:%S").ok().map(|dt| dt.date())
}

/// parse with the [`DEFAULT_DATE_FORMATS`]
pub fn parse_date (s: &str) -> Option<NaiveDate> {
    parse_naive_date( s, DEFAULT_DATE_FORMATS)
}

/// two digit month key as used in summaries ("07")
pub fn month_key (month: u32)->String {
    format!("{:02}", month)
}
