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

//! historical and current-year fire data: scraping, record normalization, reconciliation into a
//! common schema, comparative aggregation and the pipeline that ties it to the spatial alignment

pub mod errors;
pub mod scrape;
pub mod record;
pub mod current;
pub mod reconcile;
pub mod aggregate;
pub mod pipeline;

pub use errors::{FirecompHistoryError, Result};
pub use record::{FireRecord, ColumnMap};
pub use reconcile::{Period, PeriodSample};
pub use aggregate::{aggregate, GroupKey, GroupSummary};
pub use pipeline::{load_firecomp_config, ComparisonPipeline, FirecompConfig, RunSummary};
