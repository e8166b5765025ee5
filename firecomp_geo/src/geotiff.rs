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

//! minimal GeoTIFF support for single band rasters: geo-reference from ModelPixelScale/ModelTiepoint
//! or ModelTransformation tags, CRS from the GeoKey directory and no-data from the GDAL_NODATA tag.
//! Rasters are written as deflate compressed float32 images

use std::{fs::File, io::{BufReader,BufWriter}, path::Path};
use ndarray::Array2;
use tiff::{
    ColorType,
    decoder::{Decoder,DecodingResult},
    encoder::{colortype::Gray32Float, Compression as TiffCompression, DeflateLevel, TiffEncoder},
    tags::Tag
};
use tracing::debug;

use crate::crs::Crs;
use crate::raster::{GeoTransform, RasterGrid};
use crate::errors::{invalid_raster, FirecompGeoError, Result};

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const MODEL_TRANSFORMATION: u16 = 34264;
const GEO_KEY_DIRECTORY: u16 = 34735;
const GDAL_NODATA: u16 = 42113;

const GT_MODEL_TYPE_KEY: u16 = 1024;
const GT_RASTER_TYPE_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_KEY: u16 = 3072;

const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;
const RASTER_PIXEL_IS_POINT: u16 = 2;

#[inline]
fn tag (code: u16)->Tag { Tag::from_u16_exhaustive(code) }

/// the (key -> value) entries of a GeoKey directory that are stored inline
fn parse_geo_keys (dir: &[u16])->Vec<(u16,u16)> {
    if dir.len() < 4 { return Vec::new() }
    let n_keys = dir[3] as usize;

    dir[4..].chunks_exact(4)
        .take(n_keys)
        .filter( |e| e[1] == 0) // only short values stored in the directory itself
        .map( |e| (e[0], e[3]))
        .collect()
}

fn geo_key (keys: &[(u16,u16)], key: u16)->Option<u16> {
    keys.iter().find( |(k,_)| *k == key).map( |(_,v)| *v)
}

fn crs_from_geo_keys (keys: &[(u16,u16)])->Result<Crs> {
    match geo_key( keys, GT_MODEL_TYPE_KEY) {
        Some(MODEL_TYPE_PROJECTED) => {
            let epsg = geo_key( keys, PROJECTED_CS_TYPE_KEY).ok_or( invalid_raster("no projected CS type key"))?;
            Crs::from_epsg( epsg as u32)
        }
        Some(MODEL_TYPE_GEOGRAPHIC) => {
            let epsg = geo_key( keys, GEOGRAPHIC_TYPE_KEY).unwrap_or( 4326);
            Crs::from_epsg( epsg as u32)
        }
        Some(other) => Err( FirecompGeoError::UnsupportedCrs( format!("GeoTIFF model type {other}"))),
        None => Err( invalid_raster("no GeoTIFF model type key"))
    }
}

fn to_f64_vec (result: DecodingResult)->Result<Vec<f64>> {
    let data = match result {
        DecodingResult::F32(v) => v.into_iter().map( |x| x as f64).collect(),
        DecodingResult::F64(v) => v,
        DecodingResult::U8(v) => v.into_iter().map( f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map( f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map( f64::from).collect(),
        DecodingResult::I8(v) => v.into_iter().map( f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map( f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map( f64::from).collect(),
        _ => return Err( invalid_raster("unsupported sample type"))
    };
    Ok(data)
}

/// read a single band GeoTIFF into a [`RasterGrid`]
pub fn read_geotiff (path: impl AsRef<Path>)->Result<RasterGrid> {
    let path = path.as_ref();
    let mut decoder = Decoder::new( BufReader::new( File::open(path)?))?;

    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => return Err( invalid_raster( format!("not a single band raster: {other:?}")))
    }

    let (w,h) = decoder.dimensions()?;
    let (n_cols, n_rows) = (w as usize, h as usize);

    let keys = if decoder.find_tag( tag(GEO_KEY_DIRECTORY))?.is_some() {
        parse_geo_keys( &decoder.get_tag_u16_vec( tag(GEO_KEY_DIRECTORY))?)
    } else {
        return Err( invalid_raster( format!("not a GeoTIFF (no GeoKey directory): {path:?}")))
    };
    let crs = crs_from_geo_keys( &keys)?;

    let mut transform = if decoder.find_tag( tag(MODEL_TRANSFORMATION))?.is_some() {
        let m = decoder.get_tag_f64_vec( tag(MODEL_TRANSFORMATION))?;
        if m.len() < 8 { return Err( invalid_raster("short ModelTransformation tag")) }
        GeoTransform( [m[3], m[0], m[1], m[7], m[4], m[5]])

    } else if decoder.find_tag( tag(MODEL_TIEPOINT))?.is_some() && decoder.find_tag( tag(MODEL_PIXEL_SCALE))?.is_some() {
        let tp = decoder.get_tag_f64_vec( tag(MODEL_TIEPOINT))?;
        let sc = decoder.get_tag_f64_vec( tag(MODEL_PIXEL_SCALE))?;
        if tp.len() < 6 || sc.len() < 2 { return Err( invalid_raster("short tiepoint or pixel scale tag")) }
        let (i, j, x, y) = (tp[0], tp[1], tp[3], tp[4]);
        GeoTransform::north_up( x - i*sc[0], y + j*sc[1], sc[0], sc[1])

    } else {
        return Err( invalid_raster( format!("no geo-reference tags: {path:?}")))
    };

    // the tiepoint refers to the cell center
    if geo_key( &keys, GT_RASTER_TYPE_KEY) == Some(RASTER_PIXEL_IS_POINT) {
        let (x0,y0) = transform.to_crs( -0.5, -0.5);
        transform.0[0] = x0;
        transform.0[3] = y0;
    }

    let nodata = if decoder.find_tag( tag(GDAL_NODATA))?.is_some() {
        let s = decoder.get_tag_ascii_string( tag(GDAL_NODATA))?;
        s.trim_matches(|c: char| c == '\0' || c.is_whitespace()).parse::<f64>().ok()
    } else {
        None
    };

    let values = to_f64_vec( decoder.read_image()?)?;
    let data = Array2::from_shape_vec( (n_rows, n_cols), values)
        .map_err( |e| invalid_raster( format!("grid size does not match dimensions: {e}")))?;

    debug!("read {n_cols}x{n_rows} raster {path:?} in {crs}");
    RasterGrid::new( data, crs, transform, nodata)
}

/// write a raster as float32 GeoTIFF. Existing files are overwritten
pub fn write_geotiff (raster: &RasterGrid, path: impl AsRef<Path>)->Result<()> {
    let path = path.as_ref();
    let (n_rows, n_cols) = raster.shape();
    let crs = raster.crs;

    let geo_keys: Vec<u16> = if crs.is_geographic() {
        vec![ 1,1,0,3,
              GT_MODEL_TYPE_KEY, 0, 1, MODEL_TYPE_GEOGRAPHIC,
              GT_RASTER_TYPE_KEY, 0, 1, RASTER_PIXEL_IS_AREA,
              GEOGRAPHIC_TYPE_KEY, 0, 1, crs.epsg() as u16 ]
    } else {
        vec![ 1,1,0,3,
              GT_MODEL_TYPE_KEY, 0, 1, MODEL_TYPE_PROJECTED,
              GT_RASTER_TYPE_KEY, 0, 1, RASTER_PIXEL_IS_AREA,
              PROJECTED_CS_TYPE_KEY, 0, 1, crs.epsg() as u16 ]
    };

    let data: Vec<f32> = raster.data.iter().map( |v| *v as f32).collect();
    let t = raster.transform.0;

    let file = BufWriter::new( File::create(path)?);
    let mut tiff = TiffEncoder::new( file)?.with_compression( TiffCompression::Deflate(DeflateLevel::Balanced));
    let mut image = tiff.new_image::<Gray32Float>( n_cols as u32, n_rows as u32)?;
    {
        let dir = image.encoder();
        // tiepoint/scale can only express north-up grids
        if raster.transform.is_rotated() || t[1] < 0.0 || t[5] > 0.0 {
            let m: [f64;16] = [ t[1], t[2], 0.0, t[0],
                                t[4], t[5], 0.0, t[3],
                                0.0,  0.0,  0.0, 0.0,
                                0.0,  0.0,  0.0, 1.0 ];
            dir.write_tag( tag(MODEL_TRANSFORMATION), &m[..])?;
        } else {
            let scale: [f64;3] = [ t[1].abs(), t[5].abs(), 0.0];
            let tiepoint: [f64;6] = [ 0.0, 0.0, 0.0, t[0], t[3], 0.0];
            dir.write_tag( tag(MODEL_PIXEL_SCALE), &scale[..])?;
            dir.write_tag( tag(MODEL_TIEPOINT), &tiepoint[..])?;
        }
        dir.write_tag( tag(GEO_KEY_DIRECTORY), &geo_keys[..])?;
        if let Some(nd) = raster.nodata {
            dir.write_tag( tag(GDAL_NODATA), nd.to_string().as_str())?;
        }
    }
    image.write_data( &data)?;

    debug!("wrote {n_cols}x{n_rows} raster {path:?}");
    Ok(())
}
