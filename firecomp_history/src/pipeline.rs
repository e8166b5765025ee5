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

//! the linear fetch - normalize - align - clip - aggregate run and its outputs

use std::{collections::HashSet, fs::File, io::{BufWriter,Write}, path::{Path,PathBuf}};
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};
use firecomp_common::{config::resolve_config_path, fs::ensure_dir, load_config};
use firecomp_geo::{
    align::{common_crs, reproject_raster, PointSet},
    boundary::BoundaryPolygon,
    clip::clip,
    coords::CoordPolicy,
    crs::Crs,
    geotiff::{read_geotiff, write_geotiff},
    raster::{RasterGrid, RasterStats},
};

use crate::scrape::{load_table, TableSource};
use crate::record::{records_from_table, ColumnMap, FireRecord};
use crate::current::{load_current_fires, load_perimeters, CurrentColumns, CurrentFire, CurrentPerimeter, PerimeterColumns};
use crate::reconcile::{check_periods, period_for_year, reconcile, samples_from_current, samples_from_history, samples_from_perimeters, Period, PeriodSample};
use crate::aggregate::{aggregate, compare_monthly, summarize_groups, GroupKey, GroupSummary, MonthlyComparison, NO_EXPECTED_KEYS};
use crate::errors::{config_error, Result};

pub const SUMMARY_FILE: &str = "summary.json";
pub const PERIOD_SIZES_FILE: &str = "period_sizes.csv";
pub const MONTHLY_FILE: &str = "monthly.csv";
pub const YEARLY_FILE: &str = "yearly.csv";

/* #region config *****************************************************************************************/

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct FirecompConfig {
    pub history: HistoryConfig,
    #[serde(default)]
    pub current: Option<CurrentConfig>,
    pub periods: Vec<Period>,
    #[serde(default)]
    pub months_of_interest: Vec<u32>,
    #[serde(default)]
    pub coord_policy: CoordPolicy,
    #[serde(default)]
    pub boundary: Option<BoundaryConfig>,
    #[serde(default)]
    pub rasters: Vec<RasterConfig>,
    /// the crs all datasets are aligned to. Defaults to the crs of the first raster
    #[serde(default)]
    pub target_crs: Option<Crs>,
    /// cell size of reprojected rasters in target crs units
    #[serde(default)]
    pub cell_size: Option<f64>,
    /// drop located fires outside of the boundary
    #[serde(default="default_true")]
    pub filter_to_boundary: bool,
    pub output_dir: PathBuf,
}

fn default_true()->bool { true }

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct HistoryConfig {
    pub source: TableSource,
    #[serde(default)]
    pub columns: ColumnMap,
    /// chrono formats for the discovery date column, the common ones are tried if empty
    #[serde(default)]
    pub date_formats: Vec<String>,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum SizeSource {
    /// sizes reported with the fire locations
    #[default]
    Points,
    /// areas of the mapped fire perimeters
    Perimeters,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct CurrentConfig {
    pub period: Period,
    pub points: PathBuf,
    #[serde(default)]
    pub columns: CurrentColumns,
    #[serde(default)]
    pub perimeters: Option<PathBuf>,
    #[serde(default)]
    pub perimeter_columns: PerimeterColumns,
    #[serde(default)]
    pub size_source: SizeSource,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct BoundaryConfig {
    pub path: PathBuf,
    /// crs of the GeoJSON coordinates if the file does not declare one
    #[serde(default)]
    pub crs: Option<Crs>,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RasterConfig {
    pub name: String,
    pub path: PathBuf,
    /// sample this raster at fire locations (e.g. elevation)
    #[serde(default)]
    pub sample_at_fires: bool,
}

impl FirecompConfig {
    pub fn check (&self)->Result<()> {
        if self.periods.is_empty() {
            return Err( config_error("no periods"))
        }
        let mut periods = self.periods.clone();
        if let Some(current) = &self.current {
            periods.push( current.period.clone());
        }
        check_periods( &periods)?;

        if let Some(m) = self.months_of_interest.iter().find( |m| **m < 1 || **m > 12) {
            return Err( config_error( format!("invalid month of interest {m}")))
        }
        if let Some(cs) = self.cell_size {
            if !(cs > 0.0) { return Err( config_error( format!("invalid cell size {cs}"))) }
        }
        if self.current.as_ref().is_some_and( |c| c.size_source == SizeSource::Perimeters && c.perimeters.is_none()) {
            return Err( config_error("perimeter sizes requested but no perimeter file configured"))
        }
        Ok(())
    }

    /// all period labels in comparison order (historical periods first)
    pub fn period_labels (&self)->Vec<String> {
        let mut labels: Vec<String> = self.periods.iter().map( |p| p.label.clone()).collect();
        if let Some(current) = &self.current {
            labels.push( current.period.label.clone());
        }
        labels
    }

    /// make relative paths relative to the directory of the config file
    pub fn resolve_paths (&mut self, config_path: &Path) {
        if let TableSource::File(path) = &mut self.history.source {
            *path = resolve_config_path( config_path, path.as_path());
        }
        if let Some(current) = &mut self.current {
            current.points = resolve_config_path( config_path, &current.points);
            if let Some(perimeters) = &mut current.perimeters {
                *perimeters = resolve_config_path( config_path, perimeters.as_path());
            }
        }
        if let Some(boundary) = &mut self.boundary {
            boundary.path = resolve_config_path( config_path, &boundary.path);
        }
        for raster in &mut self.rasters {
            raster.path = resolve_config_path( config_path, &raster.path);
        }
        self.output_dir = resolve_config_path( config_path, &self.output_dir);
    }
}

/// load, resolve and check a RON config
pub fn load_firecomp_config (path: impl AsRef<Path>)->Result<FirecompConfig> {
    let path = path.as_ref();
    let mut config: FirecompConfig = load_config( path)?;
    config.resolve_paths( path);
    config.check()?;
    Ok(config)
}

/* #endregion config */

/* #region summary ****************************************************************************************/

#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct HistoryStats {
    pub rows: usize,
    pub records: usize,
    pub malformed_coordinates: usize,
    pub dropped: usize,
    pub skipped_rows: usize,
    pub located: usize,
    pub outside_boundary: usize,
}

#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct CurrentStats {
    pub fires: usize,
    pub perimeters: usize,
    pub located: usize,
    pub outside_boundary: usize,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RasterSummary {
    pub name: String,
    pub shape: (usize,usize),
    pub stats: RasterStats,
    pub output: Option<PathBuf>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SampledRasterSummary {
    pub raster: String,
    pub by_period: Vec<GroupSummary>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RunSummary {
    pub crs: Crs,
    pub history: HistoryStats,
    pub current: Option<CurrentStats>,
    pub period_sizes: Vec<GroupSummary>,
    pub monthly: Vec<GroupSummary>,
    pub yearly: Vec<GroupSummary>,
    pub monthly_comparison: MonthlyComparison,
    pub rasters: Vec<RasterSummary>,
    pub sampled: Vec<SampledRasterSummary>,
}

/* #endregion summary */

/// located points of a source aligned to the common crs, plus the indices of the items that are
/// outside of the boundary
struct AlignedPoints {
    points: PointSet,
    outside: HashSet<usize>,
}

fn align_points (located: impl Iterator<Item=(usize,f64,f64)>, crs: &Crs, boundary: Option<&BoundaryPolygon>)->Result<AlignedPoints> {
    let all = PointSet::from_lon_lat( located).reproject( crs)?;
    match boundary {
        Some(boundary) => {
            let points = all.within( boundary)?;
            let inside: HashSet<usize> = points.points.iter().map( |p| p.index).collect();
            let outside = all.points.iter().map( |p| p.index).filter( |i| !inside.contains(i)).collect();
            Ok( AlignedPoints { points, outside } )
        }
        None => Ok( AlignedPoints { points: all, outside: HashSet::new() } )
    }
}

pub struct ComparisonPipeline {
    config: FirecompConfig,
}

impl ComparisonPipeline {
    pub fn new (config: FirecompConfig)->Result<Self> {
        config.check()?;
        Ok( ComparisonPipeline { config } )
    }

    pub fn config (&self)->&FirecompConfig { &self.config }

    /// run all steps and write the outputs. Every failure is fatal
    pub fn run (&self)->Result<RunSummary> {
        let summary = self.compute()?;
        self.write_outputs( &summary)?;
        Ok(summary)
    }

    /// run all steps but only write the clipped rasters
    pub fn compute (&self)->Result<RunSummary> {
        let cfg = &self.config;
        let labels = cfg.period_labels();

        // fetch + normalize
        let table = load_table( &cfg.history.source)?;
        let batch = if cfg.history.date_formats.is_empty() {
            records_from_table( &table, &cfg.history.columns, cfg.coord_policy, firecomp_common::datetime::DEFAULT_DATE_FORMATS)?
        } else {
            records_from_table( &table, &cfg.history.columns, cfg.coord_policy, &cfg.history.date_formats)?
        };
        info!("{} historical fire records", batch.records.len());

        let (current_fires, perimeters) = self.load_current()?;

        // align
        let boundary = self.load_boundary()?;
        let rasters = self.load_rasters()?;
        let raster_refs: Vec<&RasterGrid> = rasters.iter().map( |(_,r)| r).collect();
        let crs = common_crs( cfg.target_crs, &raster_refs, boundary.as_ref());
        info!("common crs is {crs}");

        let boundary = match boundary {
            Some(b) => Some( b.reproject( &crs)?),
            None => None
        };
        let filter_boundary = if cfg.filter_to_boundary { boundary.as_ref() } else { None };

        let history_pts = align_points( batch.located(), &crs, filter_boundary)?;
        let records: Vec<FireRecord> = batch.records.iter().enumerate()
            .filter( |(i,_)| !history_pts.outside.contains(i))
            .map( |(_,r)| r.clone())
            .collect();
        if !history_pts.outside.is_empty() {
            info!("{} historical fires outside of boundary", history_pts.outside.len());
        }

        let current_pts = match &current_fires {
            Some(fires) => {
                let located = fires.iter().enumerate().filter_map( |(i,f)| f.location().map( |(lon,lat)| (i,lon,lat)));
                Some( align_points( located, &crs, filter_boundary)?)
            }
            None => None
        };

        // clip
        let mut raster_summaries = Vec::new();
        let mut sampled = Vec::new();
        for (rc, raster) in &rasters {
            let aligned = reproject_raster( raster, &crs, cfg.cell_size)?;
            let (grid, output) = match &boundary {
                Some(b) => {
                    let clipped = clip( &aligned, b)?;
                    ensure_dir( &cfg.output_dir)?;
                    let path = cfg.output_dir.join( format!("{}_clipped.tif", rc.name));
                    write_geotiff( &clipped, &path)?;
                    info!("clipped raster '{}' written to {:?}", rc.name, path);
                    (clipped, Some(path))
                }
                None => (aligned, None)
            };

            if rc.sample_at_fires {
                sampled.push( self.sample_raster( &rc.name, &grid, &batch.records, &history_pts, current_pts.as_ref(), &labels)?);
            }
            raster_summaries.push( RasterSummary { name: rc.name.clone(), shape: grid.shape(), stats: grid.stats(), output });
        }

        // reconcile + aggregate
        let history_samples = samples_from_history( &records, &cfg.periods);
        let current_samples = match (&cfg.current, &current_fires) {
            (Some(cc), Some(fires)) => match cc.size_source {
                SizeSource::Points => {
                    let outside = current_pts.as_ref().map( |p| &p.outside);
                    let kept: Vec<CurrentFire> = fires.iter().enumerate()
                        .filter( |(i,_)| !outside.is_some_and( |o| o.contains(i)))
                        .map( |(_,f)| f.clone())
                        .collect();
                    samples_from_current( &kept, &cc.period)
                }
                SizeSource::Perimeters => samples_from_perimeters( perimeters.as_deref().unwrap_or(&[]), &cc.period),
            },
            _ => Vec::new()
        };
        let samples: Vec<PeriodSample> = reconcile( history_samples, current_samples);
        debug!("{} reconciled samples", samples.len());

        let month_keys: Vec<String> = cfg.months_of_interest.iter().map( |m| firecomp_common::datetime::month_key(*m)).collect();

        let summary = RunSummary {
            crs,
            history: HistoryStats {
                rows: table.rows.len(),
                records: records.len(),
                malformed_coordinates: batch.malformed_coordinates,
                dropped: batch.dropped,
                skipped_rows: batch.skipped_rows,
                located: history_pts.points.len(),
                outside_boundary: history_pts.outside.len(),
            },
            current: current_fires.as_ref().map( |fires| CurrentStats {
                fires: fires.len(),
                perimeters: perimeters.as_ref().map( |p| p.len()).unwrap_or(0),
                located: current_pts.as_ref().map( |p| p.points.len()).unwrap_or(0),
                outside_boundary: current_pts.as_ref().map( |p| p.outside.len()).unwrap_or(0),
            }),
            period_sizes: aggregate( &samples, GroupKey::Period, &labels),
            monthly: aggregate( &samples, GroupKey::Month, &month_keys),
            yearly: aggregate( &samples, GroupKey::Year, NO_EXPECTED_KEYS),
            monthly_comparison: compare_monthly( &samples, &cfg.months_of_interest, &labels),
            rasters: raster_summaries,
            sampled,
        };

        for s in &summary.period_sizes {
            info!("period {}: {} fires, median size {:?} ha", s.key, s.count, s.median);
        }
        Ok(summary)
    }

    fn load_current (&self)->Result<(Option<Vec<CurrentFire>>, Option<Vec<CurrentPerimeter>>)> {
        match &self.config.current {
            Some(cc) => {
                let fires = load_current_fires( &cc.points, &cc.columns, self.config.coord_policy)?;
                let perimeters = match &cc.perimeters {
                    Some(path) => Some( load_perimeters( path, &cc.perimeter_columns)?),
                    None => None
                };
                Ok( (Some(fires), perimeters) )
            }
            None => Ok( (None, None) )
        }
    }

    fn load_boundary (&self)->Result<Option<BoundaryPolygon>> {
        match &self.config.boundary {
            Some(bc) => {
                let boundary = BoundaryPolygon::from_geojson_file( &bc.path, bc.crs.unwrap_or( Crs::WGS84))?;
                info!("boundary {:?} in {}", bc.path, boundary.crs());
                Ok( Some(boundary))
            }
            None => Ok(None)
        }
    }

    fn load_rasters (&self)->Result<Vec<(RasterConfig,RasterGrid)>> {
        let mut rasters = Vec::with_capacity( self.config.rasters.len());
        for rc in &self.config.rasters {
            let raster = read_geotiff( &rc.path)?;
            info!("raster '{}' {:?} in {}", rc.name, raster.shape(), raster.crs);
            rasters.push( (rc.clone(), raster));
        }
        Ok(rasters)
    }

    /// raster values at the fire locations, summarized per period. Point indices refer to `records`
    fn sample_raster (&self, name: &str, raster: &RasterGrid, records: &[FireRecord], history: &AlignedPoints,
                      current: Option<&AlignedPoints>, labels: &[String])->Result<SampledRasterSummary> {
        let cfg = &self.config;
        let mut pairs: Vec<(String,f64)> = Vec::new();

        let values = history.points.sample( raster)?;
        if values.len() < history.points.len() {
            warn!("{} of {} fire locations have no '{name}' value", history.points.len() - values.len(), history.points.len());
        }
        for (idx, v) in values {
            if let Some(p) = records.get(idx).and_then( |r| period_for_year( &cfg.periods, r.year)) {
                pairs.push( (p.label.clone(), v));
            }
        }

        if let (Some(current), Some(cc)) = (current, &cfg.current) {
            for (_,v) in current.points.sample( raster)? {
                pairs.push( (cc.period.label.clone(), v));
            }
        }

        Ok( SampledRasterSummary { raster: name.to_string(), by_period: summarize_groups( pairs, labels) } )
    }

    fn write_outputs (&self, summary: &RunSummary)->Result<()> {
        write_outputs( summary, &self.config.output_dir)
    }
}

/// write summary.json and the CSV tables into `dir`
pub fn write_outputs (summary: &RunSummary, dir: &Path)->Result<()> {
    ensure_dir( dir)?;

    let mut json = BufWriter::new( File::create( dir.join( SUMMARY_FILE))?);
    serde_json::to_writer_pretty( &mut json, summary)?;
    json.flush()?;

    write_groups( &summary.period_sizes, &dir.join( PERIOD_SIZES_FILE))?;
    write_groups( &summary.yearly, &dir.join( YEARLY_FILE))?;

    let mut w = csv::Writer::from_path( dir.join( MONTHLY_FILE))?;
    let mut header = vec!["month".to_string()];
    header.extend( summary.monthly_comparison.periods.iter().cloned());
    w.write_record( &header)?;
    for row in &summary.monthly_comparison.rows {
        let mut rec = vec![ row.month.clone()];
        rec.extend( row.counts.iter().map( |c| c.to_string()));
        w.write_record( &rec)?;
    }
    w.flush()?;

    info!("outputs written to {dir:?}");
    Ok(())
}

fn write_groups (groups: &[GroupSummary], path: &Path)->Result<()> {
    let mut w = csv::Writer::from_path( path)?;
    for g in groups {
        w.serialize( g)?;
    }
    w.flush()?;
    Ok(())
}
