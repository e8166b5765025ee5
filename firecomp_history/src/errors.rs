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

use firecomp_common::define_error;

pub type Result<T> = std::result::Result<T, FirecompHistoryError>;

define_error!{ pub FirecompHistoryError =
    IOError( #[from] std::io::Error) : "IO error: {0}",
    HttpError( #[from] reqwest::Error) : "HTTP error: {0}",
    CsvError( #[from] csv::Error) : "CSV error: {0}",
    JsonError( #[from] serde_json::Error) : "JSON error: {0}",
    CommonError( #[from] firecomp_common::CommonError) : "{0}",
    GeoError( #[from] firecomp_geo::FirecompGeoError) : "{0}",
    NoTable(String) : "no table found: {0}",
    SchemaError(String) : "schema error: {0}",
    MalformedRecord(String) : "malformed record: {0}",
    ConfigError(String) : "config error: {0}"
}

pub fn missing_column (name: &str)->FirecompHistoryError {
    FirecompHistoryError::SchemaError( format!("missing column '{name}'"))
}

pub fn config_error<S: ToString> (msg: S)->FirecompHistoryError {
    FirecompHistoryError::ConfigError(msg.to_string())
}
