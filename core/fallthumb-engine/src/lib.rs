//! Fallback thumbnail resolution.
//!
//! Given a content item, the engine walks an ordered chain of fallback
//! strategies (the item's own image, its categories, its tags, a site-wide
//! default) and returns the first candidate image that satisfies the
//! required size.
//!
//! - [`SizePolicy`]: turns a [`SizeSpec`](fallthumb_types::SizeSpec) into pixel targets and checks images against them
//! - [`FallbackStrategy`]: one level of the chain, producing candidate images
//! - [`FallbackChain`] / [`ChainBuilder`]: ordering with "insert after" placement
//! - [`ThumbnailService`]: the per-request façade hosts call into
//!
//! The host platform is reached only through the traits in [`host`].

mod builder;
mod chain;
mod config;
mod error;
pub mod host;
mod service;
mod size;
mod strategy;

pub use builder::{BuiltinFallbacks, ChainBuilder, ChainContributor, contributor_fn, keys};
pub use chain::{ChainNode, FallbackChain};
pub use config::ThumbnailConfig;
pub use error::{
    ChainError, ConfigError, ResolutionError, StrategyError, ThumbnailError, ThumbnailResult,
};
pub use service::{RequiredSizeHook, ThumbnailArgs, ThumbnailOptions, ThumbnailService};
pub use size::{SizePolicy, SizeStatus};
pub use strategy::{
    CategoryStrategy, FallbackStrategy, FnStrategy, PostStrategy, SiteStrategy, StrategyArgs,
    StrategyContext, TaxonomyStrategy, strategy_fn,
};
