// src/checker/mod.rs
// =============================================================================
// This module contains the per-URL building blocks of the crawl.
//
// Submodules:
// - paths:     slash-delimited segment matching shared by the scope rules
// - normalize: canonical URL identity for the visited set
// - policy:    hierarchy guard and ignore lists
// - assets:    extension -> asset category table
// - html:      link and asset extraction from a fetched page
// - http:      the Fetcher seam and its reqwest implementation
//
// The crawl engine in src/crawl/ wires these together.
// =============================================================================

mod assets;
mod html;
mod http;
mod normalize;
mod paths;
mod policy;

pub use assets::AssetKind;
pub use html::extract_references;
pub use http::{FetchResult, Fetcher, HttpFetcher, LinkOutcome, TransportFailure};
pub use normalize::{canonicalize, equivalent_forms, normalize};
pub use policy::{HierarchyGuard, IgnorePolicy};
