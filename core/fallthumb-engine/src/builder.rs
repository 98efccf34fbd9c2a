//! Chain registration: the extension point third parties hook into.

use crate::chain::{ChainNode, FallbackChain};
use crate::config::ThumbnailConfig;
use crate::error::ChainError;
use crate::strategy::{
    CategoryStrategy, FallbackStrategy, PostStrategy, SiteStrategy, TaxonomyStrategy,
};
use fallthumb_types::SITE_SLUG;

/// Keys of the built-in chain nodes.
pub mod keys {
    pub const POST: &str = "post";
    pub const CATEGORY: &str = "category";
    pub const TAG: &str = "tag";
    pub const SITE: &str = "site";
}

/// Collects chain registrations before the chain is built.
///
/// Entries keep declaration order. Contributing a key that is already
/// declared replaces that entry in place, so a contributor can swap out a
/// built-in level without moving it.
#[derive(Debug, Default)]
pub struct ChainBuilder {
    entries: Vec<ChainNode>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a node with no static arguments.
    pub fn add(
        &mut self,
        key: impl Into<String>,
        strategy: impl FallbackStrategy + 'static,
        after: Option<&str>,
    ) -> &mut Self {
        let mut node = ChainNode::new(key, strategy);
        node.after = after.map(str::to_string);
        self.add_node(node)
    }

    pub fn add_node(&mut self, node: ChainNode) -> &mut Self {
        match self.entries.iter_mut().find(|e| e.key == node.key) {
            Some(existing) => *existing = node,
            None => self.entries.push(node),
        }
        self
    }

    /// Drops a declared node, returning it.
    pub fn remove(&mut self, key: &str) -> Option<ChainNode> {
        let pos = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(pos))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Declared keys in declaration order (not chain order).
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn apply(&mut self, contributor: &dyn ChainContributor) -> &mut Self {
        contributor.contribute(self);
        self
    }

    /// Registers every declared node, in declaration order.
    pub fn build(self) -> Result<FallbackChain, ChainError> {
        let mut chain = FallbackChain::new();
        for node in self.entries {
            chain.register(node)?;
        }
        Ok(chain)
    }
}

/// Something that adds levels to the fallback chain.
pub trait ChainContributor {
    fn contribute(&self, builder: &mut ChainBuilder);
}

/// A contributor backed by a closure. Build one with [`contributor_fn`].
pub struct FnContributor<F>(F);

pub fn contributor_fn<F>(f: F) -> FnContributor<F>
where
    F: Fn(&mut ChainBuilder),
{
    FnContributor(f)
}

impl<F> ChainContributor for FnContributor<F>
where
    F: Fn(&mut ChainBuilder),
{
    fn contribute(&self, builder: &mut ChainBuilder) {
        (self.0)(builder)
    }
}

/// The four built-in levels: `post > category > tag > site`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinFallbacks {
    pub tag_taxonomy: String,
    pub site_slug: String,
}

impl BuiltinFallbacks {
    pub fn from_config(config: &ThumbnailConfig) -> Self {
        Self {
            tag_taxonomy: config.tag_taxonomy.clone(),
            site_slug: config.site_slug.clone(),
        }
    }
}

impl Default for BuiltinFallbacks {
    fn default() -> Self {
        Self {
            tag_taxonomy: TaxonomyStrategy::DEFAULT_TAXONOMY.to_string(),
            site_slug: SITE_SLUG.to_string(),
        }
    }
}

impl ChainContributor for BuiltinFallbacks {
    fn contribute(&self, builder: &mut ChainBuilder) {
        builder
            .add(keys::POST, PostStrategy, None)
            .add(keys::CATEGORY, CategoryStrategy, Some(keys::POST))
            .add_node(
                ChainNode::new(keys::TAG, TaxonomyStrategy)
                    .after(keys::CATEGORY)
                    .with_arg("taxonomy", self.tag_taxonomy.as_str()),
            )
            .add_node(
                ChainNode::new(keys::SITE, SiteStrategy)
                    .after(keys::TAG)
                    .with_arg("slug", self.site_slug.as_str()),
            );
    }
}
