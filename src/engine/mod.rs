pub mod facets;
pub mod query;
pub mod stats;

pub use facets::{extract_facets, Facet, FacetOptions, FacetSelections};
pub use query::{query, SortKey};
pub use stats::{collection_stats, CollectionStats};
