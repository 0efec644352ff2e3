pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod types;
pub mod unescape;

pub use client::{CertCheckClient, PageSource};
pub use devshoes_core::{shoe_stats, ShoeStats};
pub use error::{FailureKind, ScraperError};
pub use extract::{extract_payload, locate_marker};
pub use pipeline::{
    fetch_development_shoes, parse_development_shoes, parse_payload, select_development_shoes,
    try_fetch_development_shoes,
};
pub use unescape::unescape_js;
