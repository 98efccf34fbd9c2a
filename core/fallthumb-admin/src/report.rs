use crate::error::AdminResult;
use fallthumb_engine::{FallbackChain, SizePolicy, SizeStatus};
use fallthumb_store::SlugImageStore;
use fallthumb_types::{ResolvedSize, SizeSpec, SlugMapping};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub mapping: SlugMapping,
    pub status: SizeStatus,
}

/// Overview shown on the admin screen: every mapping checked against the
/// required size, plus the active fallback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    pub required: SizeSpec,
    pub resolved: ResolvedSize,
    pub chain: String,
    pub entries: Vec<MappingEntry>,
}

impl MappingReport {
    pub fn build(
        store: &dyn SlugImageStore,
        policy: &SizePolicy<'_>,
        required: &SizeSpec,
        chain: &FallbackChain,
    ) -> AdminResult<Self> {
        let resolved = policy.resolve(required)?;
        let entries = store
            .list()?
            .into_iter()
            .map(|mapping| MappingEntry {
                status: policy.status(mapping.image, required, &resolved),
                mapping,
            })
            .collect();

        Ok(Self {
            required: required.clone(),
            resolved,
            chain: chain.summary(),
            entries,
        })
    }

    /// Mappings that will never be picked at the required size.
    pub fn problems(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter().filter(|e| e.status != SizeStatus::Fits)
    }
}

impl fmt::Display for MappingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fallback tree: {}", self.chain)?;
        writeln!(f, "Minimum size {}: {}", self.required, self.resolved)?;
        for entry in &self.entries {
            let status = match entry.status {
                SizeStatus::Fits => "ok",
                SizeStatus::TooSmall => "too small",
                SizeStatus::Missing => "missing",
            };
            writeln!(
                f,
                "  [{}] {} -> image {} ({})",
                entry.mapping.id, entry.mapping.slug, entry.mapping.image, status
            )?;
        }
        Ok(())
    }
}
