pub mod enrichment;
pub mod movies;
pub mod providers;
pub mod recommendations;
pub mod samples;
pub mod share;

pub use providers::{MovieCatalog, RecommendationSource};
pub use samples::{BuiltinSamples, NoSamples, SampleData};
