//! Static mesh render data.
//!
//! These decoders are the canonical instance of the version-conditional
//! layout discipline: read strip flags first, branch on the serialization
//! version and engine release for mutually exclusive layouts, read the
//! layout switches before committing to a body, then decode sub-buffers
//! in the fixed on-disk order with each optional section gated by its
//! strip bit. Legacy branches the crate does not carry fail explicitly
//! instead of desynchronizing the cursor.

mod index_buffer;
mod lod;
mod sampler;
mod section;
mod vertex;

pub use index_buffer::RawIndexBuffer;
pub use lod::{
    LodResources, CDSF_ADJACENCY_DATA, CDSF_MIN_LOD_DATA, CDSF_RAYTRACING_RESOURCES,
    CDSF_REVERSED_INDEX_BUFFER,
};
pub use sampler::WeightedRandomSampler;
pub use section::MeshSection;
pub use vertex::{MeshVertexBuffer, PositionVertexBuffer};
