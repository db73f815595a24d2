//! Area-weighted triangle sampler tables.

use std::io::{Read, Seek};

use crate::reader::AssetReader;
use crate::Result;

/// Precomputed alias tables for weighted random triangle sampling,
/// serialized after each LOD's buffers (one per section plus one for the
/// whole mesh).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedRandomSampler {
    pub prob: Vec<f32>,
    pub alias: Vec<i32>,
    pub total_weight: f32,
}

impl WeightedRandomSampler {
    pub fn parse<R: Read + Seek>(reader: &mut AssetReader<R>) -> Result<Self> {
        Ok(Self {
            prob: reader.read_array(|r| r.read_f32())?,
            alias: reader.read_array(|r| r.read_i32())?,
            total_weight: reader.read_f32()?,
        })
    }
}
