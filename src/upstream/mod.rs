// Upstream services — thin HTTP clients for everything not in the local DB.
//
// BrandMentionsClient speaks the third-party command-style API;
// BackendClient talks to the project-ingest service that owns project
// creation and bulk mention fetches. Neither fabricates fallback data:
// an unreachable or failing upstream is a typed error the caller decides
// how to surface.

pub mod backend;
pub mod brandmentions;

pub use backend::BackendClient;
pub use brandmentions::BrandMentionsClient;

/// Default base URL for the BrandMentions API.
pub const DEFAULT_BRANDMENTIONS_URL: &str = "https://api.brandmentions.com";
