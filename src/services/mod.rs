pub mod discount;
pub mod freshness;
pub mod pipeline;
pub mod reconciler;
pub mod signature;

pub use pipeline::{Rejection, Stage, ValidationPipeline};
