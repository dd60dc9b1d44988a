pub mod instances;
pub mod spheres;

pub use instances::{InstanceBatch, SphereInstance};
pub use spheres::SphereRenderer;
