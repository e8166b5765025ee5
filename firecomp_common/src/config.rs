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

//! RON based configuration loading. Configs are plain serde structs, paths inside of configs
//! are resolved relative to the directory of the config file unless they are absolute

use std::{fs, path::{Path,PathBuf}};
use serde::Deserialize;
use tracing::debug;

use crate::errors::{CommonError,Result};

/// load a config of type `C` from the RON file at `path`
pub fn load_config<C,P> (path: P) -> Result<C> where C: for<'a> Deserialize<'a>, P: AsRef<Path> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err( CommonError::ConfigError( format!("config file not found: {path:?}")))
    }

    let data = fs::read_to_string(path)?;
    debug!("loading config {:?}", path);
    config_from_str( &data)
}

/// parse a config of type `C` from a RON string
pub fn config_from_str<C> (src: &str) -> Result<C> where C: for<'a> Deserialize<'a> {
    Ok( ron::de::from_str( src)? )
}

/// resolve a path that was specified in a config file relative to the directory of that file
pub fn resolve_config_path (config_path: impl AsRef<Path>, path: impl AsRef<Path>)->PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        match config_path.as_ref().parent() {
            Some(dir) => dir.join(path),
            None => path.to_path_buf()
        }
    }
}
