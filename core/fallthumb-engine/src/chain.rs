//! The ordered fallback chain.

use crate::error::{ChainError, ResolutionError};
use crate::size::SizePolicy;
use crate::strategy::{FallbackStrategy, StrategyArgs, StrategyContext};
use fallthumb_types::{ContentId, ImageRef, SizeSpec};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// One registered level of the chain.
#[derive(Clone)]
pub struct ChainNode {
    pub key: String,
    /// Key of the node this one should follow. `None` only ever lands first
    /// on an empty chain; otherwise such nodes are appended.
    pub after: Option<String>,
    pub strategy: Arc<dyn FallbackStrategy>,
    pub static_args: Map<String, Value>,
}

impl ChainNode {
    pub fn new(key: impl Into<String>, strategy: impl FallbackStrategy + 'static) -> Self {
        Self {
            key: key.into(),
            after: None,
            strategy: Arc::new(strategy),
            static_args: Map::new(),
        }
    }

    pub fn after(mut self, key: impl Into<String>) -> Self {
        self.after = Some(key.into());
        self
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.static_args.insert(name.into(), value.into());
        self
    }
}

impl fmt::Debug for ChainNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainNode")
            .field("key", &self.key)
            .field("after", &self.after)
            .field("static_args", &self.static_args)
            .finish_non_exhaustive()
    }
}

/// Ordered list of fallback strategies.
///
/// Placement is best effort rather than a topological sort: each node is
/// inserted relative to the nodes already present, so the final order
/// depends on registration order when `after` targets arrive late.
#[derive(Debug, Clone, Default)]
pub struct FallbackChain {
    nodes: Vec<ChainNode>,
}

impl FallbackChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node.
    ///
    /// 1. Directly after the node whose key equals `after`, if present.
    /// 2. Otherwise directly before the first node waiting to follow this key.
    /// 3. Otherwise at the end.
    ///
    /// Fails without modifying the chain when the key is taken or the `after`
    /// links would form a cycle.
    pub fn register(&mut self, node: ChainNode) -> Result<(), ChainError> {
        if self.position(&node.key).is_some() {
            return Err(ChainError::DuplicateKey(node.key));
        }
        self.check_cycle(&node)?;

        let index = self.insertion_index(&node);
        debug!("fallback node {:?} placed at {}", node.key, index);
        self.nodes.insert(index, node);
        Ok(())
    }

    fn insertion_index(&self, node: &ChainNode) -> usize {
        if let Some(pos) = node.after.as_deref().and_then(|after| self.position(after)) {
            return pos + 1;
        }
        self.nodes
            .iter()
            .position(|n| n.after.as_deref() == Some(node.key.as_str()))
            .unwrap_or(self.nodes.len())
    }

    // The chain is acyclic before every insert, so any cycle has to pass
    // through the new node.
    fn check_cycle(&self, node: &ChainNode) -> Result<(), ChainError> {
        let mut cursor = node.after.as_deref();
        for _ in 0..=self.nodes.len() {
            let Some(target) = cursor else {
                return Ok(());
            };
            if target == node.key {
                return Err(ChainError::Cycle {
                    key: node.key.clone(),
                    after: node.after.clone().unwrap_or_default(),
                });
            }
            cursor = self
                .nodes
                .iter()
                .find(|n| n.key == target)
                .and_then(|n| n.after.as_deref());
        }
        Ok(())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&ChainNode> {
        self.nodes.iter().find(|n| n.key == key)
    }

    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }

    pub fn keys(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node keys in order, e.g. `post > category > tag > site`.
    pub fn summary(&self) -> String {
        self.keys().join(" > ")
    }

    /// Walks the chain and returns the first candidate that fits `spec`.
    ///
    /// The size is resolved once up front; a resolution failure is the only
    /// error. A node whose candidates all miss the size, or whose strategy
    /// fails, just hands over to the next node.
    pub fn resolve(
        &self,
        ctx: &StrategyContext<'_>,
        policy: &SizePolicy<'_>,
        content: ContentId,
        spec: &SizeSpec,
    ) -> Result<Option<ImageRef>, ResolutionError> {
        let size = policy.resolve(spec)?;

        for node in &self.nodes {
            let args = StrategyArgs {
                spec,
                size,
                params: &node.static_args,
            };
            let candidates = match node.strategy.produce(ctx, content, &args) {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!("fallback strategy {:?} failed for {}: {}", node.key, content, e);
                    continue;
                }
            };

            let count = candidates.len();
            if let Some(image) = candidates
                .into_iter()
                .find(|image| policy.matches(*image, spec, &size))
            {
                debug!("{:?} chose image {} for {} at {}", node.key, image, content, spec);
                return Ok(Some(image));
            }
            if count > 0 {
                debug!("{:?}: none of {} candidates fit {}", node.key, count, size);
            }
        }

        debug!("fallback chain exhausted for {} at {}", content, spec);
        Ok(None)
    }
}
