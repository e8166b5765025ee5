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

//! retrieval of the historical fire statistics page and extraction of its first HTML table.
//! We only need the cell text of a single table, which does not warrant a full HTML parser

use std::{fs, path::PathBuf};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Serialize,Deserialize};
use tracing::{debug,info};

use crate::errors::{FirecompHistoryError, Result};

lazy_static! {
    static ref TABLE_RE: Regex = Regex::new(r"(?is)<table\b[^>]*>(.*?)</table\s*>").unwrap();
    static ref ROW_RE: Regex = Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").unwrap();
    static ref CELL_RE: Regex = Regex::new(r"(?is)<(th|td)\b[^>]*>(.*?)</(?:th|td)\s*>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref ENTITY_RE: Regex = Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap();
    static ref WS_RE: Regex = Regex::new(r"\s+").unwrap();
}

const USER_AGENT: &str = concat!("firecomp/", env!("CARGO_PKG_VERSION"));

/// where the historical table comes from. Saved pages make runs reproducible offline
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum TableSource {
    Url(String),
    File(PathBuf),
}

/// the cell text of a table with its header row
#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index (&self, name: &str)->Option<usize> {
        let name = name.trim();
        self.headers.iter().position( |h| h.eq_ignore_ascii_case( name))
    }

    pub fn len (&self)->usize { self.rows.len() }
    pub fn is_empty (&self)->bool { self.rows.is_empty() }
}

/// blocking client with our user agent. Timeouts are the reqwest defaults
pub fn http_client ()->Result<reqwest::blocking::Client> {
    Ok( reqwest::blocking::Client::builder().user_agent( USER_AGENT).build()? )
}

pub fn fetch_html (source: &TableSource)->Result<String> {
    match source {
        TableSource::Url(url) => {
            info!("retrieving {url}");
            let client = http_client()?;
            let response = client.get( url).send()?.error_for_status()?;
            Ok( response.text()? )
        }
        TableSource::File(path) => {
            info!("reading {path:?}");
            Ok( fs::read_to_string( path)? )
        }
    }
}

/// fetch the page and extract its first table
pub fn load_table (source: &TableSource)->Result<RawTable> {
    let html = fetch_html( source)?;
    let table = first_html_table( &html)?;
    info!("table has {} columns and {} rows", table.headers.len(), table.rows.len());
    Ok(table)
}

/// cell text of the first `<table>` in `html`. The header is the first row that only has `<th>`
/// cells, or the first row if there is none. Rows are padded or truncated to the header length
pub fn first_html_table (html: &str)->Result<RawTable> {
    let body = TABLE_RE.captures( html)
        .and_then( |cap| cap.get(1))
        .ok_or_else( || FirecompHistoryError::NoTable("no <table> element in page".into()))?
        .as_str();

    let mut rows: Vec<(bool,Vec<String>)> = Vec::new();
    for row_cap in ROW_RE.captures_iter( body) {
        let mut all_th = true;
        let cells: Vec<String> = CELL_RE.captures_iter( &row_cap[1])
            .map( |c| {
                all_th &= c[1].eq_ignore_ascii_case("th");
                cell_text( &c[2])
            })
            .collect();
        if !cells.is_empty() {
            rows.push( (all_th, cells));
        }
    }

    let header_idx = rows.iter().position( |(all_th,_)| *all_th).unwrap_or(0);
    if rows.is_empty() {
        return Err( FirecompHistoryError::NoTable("first table has no rows".into()))
    }

    let headers = rows[header_idx].1.clone();
    let n = headers.len();
    let rows: Vec<Vec<String>> = rows.into_iter()
        .skip( header_idx + 1)
        .map( |(_,mut cells)| { cells.resize( n, String::new()); cells })
        .collect();

    debug!("extracted table with headers {headers:?}");
    Ok( RawTable { headers, rows } )
}

/// plain text of a cell: tags removed, entities decoded and whitespace collapsed
pub fn cell_text (html: &str)->String {
    let text = TAG_RE.replace_all( html, " ");
    let text = ENTITY_RE.replace_all( &text, |cap: &Captures| decode_entity( &cap[1]).unwrap_or_else( || cap[0].to_string()));
    WS_RE.replace_all( text.trim(), " ").trim().to_string()
}

fn decode_entity (e: &str)->Option<String> {
    let c = if let Some(hex) = e.strip_prefix("#x").or_else( || e.strip_prefix("#X")) {
        char::from_u32( u32::from_str_radix( hex, 16).ok()?)?
    } else if let Some(dec) = e.strip_prefix('#') {
        char::from_u32( dec.parse().ok()?)?
    } else {
        match e {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => ' ',
            "deg" => '°',
            "prime" => '′',
            _ => return None
        }
    };
    Some( c.to_string())
}
