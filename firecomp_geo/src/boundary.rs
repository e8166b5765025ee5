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

//! administrative region boundaries used to clip rasters and filter points

use std::{fs, path::Path};
use geo::{Area, BoundingRect, Contains, Coord, GeodesicArea, Line, LineString, MapCoords, MultiPolygon, Point, Polygon};
use geo::line_intersection::{line_intersection, LineIntersection};
use geojson::{GeoJson, quick_collection};
use uom::si::{f64::Area as AreaQuantity, area::square_meter};
use tracing::debug;
use firecomp_common::{BoundingBox, fs::existing_non_empty_file_from_path};

use crate::crs::{Crs, Transformer};
use crate::errors::{invalid_geometry, FirecompGeoError, Result};

/// one or more polygons (with optional holes) in a declared crs. Construction checks that rings are
/// closed, have a non-zero area and don't intersect themselves
#[derive(Debug,Clone,PartialEq)]
pub struct BoundaryPolygon {
    polygons: MultiPolygon<f64>,
    crs: Crs,
}

impl BoundaryPolygon {
    pub fn new (polygons: MultiPolygon<f64>, crs: Crs)->Result<Self> {
        check_valid( &polygons)?;
        Ok( BoundaryPolygon { polygons, crs } )
    }

    pub fn from_polygon (polygon: Polygon<f64>, crs: Crs)->Result<Self> {
        BoundaryPolygon::new( MultiPolygon::new( vec![polygon]), crs)
    }

    /// a rectangular boundary
    pub fn from_bbox (bbox: &BoundingBox<f64>, crs: Crs)->Result<Self> {
        let ring = LineString::from( vec![
            (bbox.west, bbox.south), (bbox.east, bbox.south), (bbox.east, bbox.north), (bbox.west, bbox.north), (bbox.west, bbox.south)
        ]);
        BoundaryPolygon::from_polygon( Polygon::new( ring, vec![]), crs)
    }

    /// parse all (multi)polygons of a GeoJSON document. The crs is taken from a (legacy) "crs"
    /// member if there is one, otherwise `default_crs` is used (RFC 7946 mandates WGS84)
    pub fn from_geojson_str (src: &str, default_crs: Crs)->Result<Self> {
        let geojson: GeoJson = src.parse()?;
        let crs = legacy_geojson_crs( src).unwrap_or( default_crs);

        let collection = quick_collection( &geojson)?;
        let mut polygons: Vec<Polygon<f64>> = Vec::new();
        for geom in collection {
            match geom {
                geo::Geometry::Polygon(p) => polygons.push(p),
                geo::Geometry::MultiPolygon(mp) => polygons.extend( mp),
                _ => {} // points and lines don't bound anything
            }
        }

        if polygons.is_empty() {
            return Err( invalid_geometry("no polygons in GeoJSON"))
        }
        BoundaryPolygon::new( MultiPolygon::new( polygons), crs)
    }

    pub fn from_geojson_file (path: impl AsRef<Path>, default_crs: Crs)->Result<Self> {
        let path = path.as_ref();
        existing_non_empty_file_from_path( path)?;
        let src = fs::read_to_string( path)?;
        let boundary = BoundaryPolygon::from_geojson_str( &src, default_crs)?;
        debug!("loaded boundary with {} polygons from {:?}", boundary.polygons.0.len(), path);
        Ok(boundary)
    }

    pub fn crs (&self)->Crs { self.crs }

    pub fn polygons (&self)->&MultiPolygon<f64> { &self.polygons }

    /// is the crs position strictly inside (points on the boundary are not)
    pub fn contains (&self, x: f64, y: f64)->bool {
        self.polygons.contains( &Point::new( x, y))
    }

    pub fn bounds (&self)->BoundingBox<f64> {
        match self.polygons.bounding_rect() {
            Some(rect) => BoundingBox::new( rect.min().x, rect.min().y, rect.max().x, rect.max().y),
            None => BoundingBox::new( f64::NAN, f64::NAN, f64::NAN, f64::NAN) // can't happen for validated polygons
        }
    }

    /// transform all vertices into `tgt`. Edges are not densified, i.e. they stay straight lines
    /// in the target crs
    pub fn reproject (&self, tgt: &Crs)->Result<BoundaryPolygon> {
        if tgt.is_equivalent( &self.crs) {
            return BoundaryPolygon::new( self.polygons.clone(), *tgt)
        }

        let transformer = Transformer::new( &self.crs, tgt)?;
        let polygons = self.polygons.try_map_coords( |c: Coord<f64>| -> Result<Coord<f64>> {
            let (x,y) = transformer.transform( c.x, c.y)?;
            Ok( Coord { x, y })
        })?;
        BoundaryPolygon::new( polygons, *tgt)
    }

    /// enclosed area. Geodesic for geographic crs, planar otherwise
    pub fn area (&self)->AreaQuantity {
        let m2 = if self.crs.is_geographic() {
            self.polygons.geodesic_area_unsigned()
        } else {
            self.polygons.unsigned_area()
        };
        AreaQuantity::new::<square_meter>( m2)
    }
}

/// the EPSG code of a pre RFC 7946 '"crs": {"type":"name","properties":{"name":"EPSG:3005"}}' member
fn legacy_geojson_crs (src: &str)->Option<Crs> {
    let v: serde_json::Value = serde_json::from_str( src).ok()?;
    let name = v.get("crs")?.get("properties")?.get("name")?.as_str()?;
    // "urn:ogc:def:crs:EPSG::3005" or "EPSG:3005"
    let code = name.rsplit(':').next()?;
    if name.ends_with("CRS84") { return Some( Crs::WGS84) }
    Crs::from_srs_spec( code).ok()
}

fn check_valid (mp: &MultiPolygon<f64>)->Result<()> {
    if mp.0.is_empty() {
        return Err( invalid_geometry("no polygons"))
    }

    for (i,poly) in mp.0.iter().enumerate() {
        for ring in std::iter::once( poly.exterior()).chain( poly.interiors().iter()) {
            if !ring.is_closed() {
                return Err( invalid_geometry( format!("polygon {i} has an open ring")))
            }
            if ring.0.len() < 4 {
                return Err( invalid_geometry( format!("polygon {i} has a ring with less than 4 coordinates")))
            }
            if ring.0.iter().any( |c| !c.x.is_finite() || !c.y.is_finite()) {
                return Err( invalid_geometry( format!("polygon {i} has non-finite coordinates")))
            }
        }
        if poly.exterior().0.len() >= 4 && Polygon::new( poly.exterior().clone(), vec![]).unsigned_area() == 0.0 {
            return Err( invalid_geometry( format!("polygon {i} has zero area")))
        }
        if let Some(pos) = find_self_intersection( poly) {
            return Err( FirecompGeoError::InvalidGeometry( format!("polygon {i} self-intersects at ({},{})", pos.x, pos.y)))
        }
    }
    Ok(())
}

struct Segment {
    line: Line<f64>,
    ring: usize,
    idx: usize,
    min_x: f64,
    max_x: f64,
}

/// sweep along x over all non-degenerate ring segments of a polygon. Consecutive segments of the
/// same ring may only share their common vertex, all others must not touch at all
fn find_self_intersection (poly: &Polygon<f64>)->Option<Coord<f64>> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut ring_lens: Vec<usize> = Vec::new();

    for (ring_idx, ring) in std::iter::once( poly.exterior()).chain( poly.interiors().iter()).enumerate() {
        let mut idx = 0;
        for line in ring.lines().filter( |l| l.start != l.end) {
            let min_x = line.start.x.min( line.end.x);
            let max_x = line.start.x.max( line.end.x);
            segments.push( Segment { line, ring: ring_idx, idx, min_x, max_x });
            idx += 1;
        }
        ring_lens.push( idx);
    }

    segments.sort_by( |a,b| a.min_x.total_cmp( &b.min_x));

    for i in 0..segments.len() {
        let si = &segments[i];
        for sj in segments[i+1..].iter().take_while( |s| s.min_x <= si.max_x) {
            let Some(isect) = line_intersection( si.line, sj.line) else { continue };

            let adjacent = si.ring == sj.ring && {
                let n = ring_lens[si.ring];
                let d = si.idx.abs_diff( sj.idx);
                d == 1 || d == n - 1
            };

            match isect {
                LineIntersection::SinglePoint { intersection, is_proper } => {
                    if !adjacent || is_proper { return Some(intersection) }
                }
                LineIntersection::Collinear { intersection } => return Some( intersection.start)
            }
        }
    }
    None
}
