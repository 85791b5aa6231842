//! PDF decoding collaborator: backend trait, lopdf implementation,
//! table detection and extraction options.

pub mod backend;
pub mod options;
pub mod tables;

pub use backend::{BBox, LopdfBackend, PageSource, RawLine, RawPage, RawSpan};
pub use options::{ExtractOptions, StrategyKind};
pub use tables::{TableDetector, TableDetectorConfig};
