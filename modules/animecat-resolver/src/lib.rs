pub mod cache;
pub mod normalize;
pub mod orchestrator;
pub mod resolver;
pub mod sink;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use cache::QueryCache;
pub use normalize::{normalize_numerals, strip_language_tags};
pub use orchestrator::{CatalogRun, Orchestrator, OrchestratorOptions, RunReport};
pub use resolver::{query_variants, Resolver};
pub use sink::{AddonManifest, StremioCatalogSink};
pub use source::JsonFileSource;
pub use traits::{CatalogSink, ItemSource, MetadataSearch};
