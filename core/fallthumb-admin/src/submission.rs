use crate::error::{AdminError, AdminResult};
use fallthumb_store::SlugImageStore;
use fallthumb_types::{ImageRef, MappingId, SlugMapping};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Capability required to change mappings.
pub const MANAGE_CAPABILITY: &str = "manage_fallback_thumbnails";

/// Who is acting on the admin screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminContext {
    pub user: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl AdminContext {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            capabilities: Vec::new(),
        }
    }

    /// A context holding [`MANAGE_CAPABILITY`].
    pub fn manager(user: impl Into<String>) -> Self {
        Self::new(user).with_capability(MANAGE_CAPABILITY)
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// The "add new thumbnail" part of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMapping {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// One submission of the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSubmission {
    /// Delete button pressed on this mapping.
    #[serde(default)]
    pub delete: Option<MappingId>,
    /// Replacement images per mapping; `None` means the picker was untouched.
    #[serde(default)]
    pub updates: Vec<(MappingId, Option<ImageRef>)>,
    #[serde(default)]
    pub new_mapping: Option<NewMapping>,
}

/// What a submission changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub deleted: Option<MappingId>,
    pub updated: Vec<MappingId>,
    pub added: Option<SlugMapping>,
}

impl SubmissionOutcome {
    pub fn is_empty(&self) -> bool {
        self.deleted.is_none() && self.updated.is_empty() && self.added.is_none()
    }
}

/// Placeholder slug for a new mapping submitted without one.
pub fn generated_slug() -> String {
    format!("test_{}", rand::thread_rng().gen_range(0..=i32::MAX))
}

/// Applies an admin form submission to the store.
///
/// A delete is handled on its own and ends the submission. Otherwise every
/// update carrying an image is applied, then the new mapping is added if an
/// image was picked. The slug is stored as given; a missing or empty one
/// gets a [`generated_slug`].
pub fn process_submission(
    store: &dyn SlugImageStore,
    ctx: &AdminContext,
    submission: &AdminSubmission,
) -> AdminResult<SubmissionOutcome> {
    if !ctx.can(MANAGE_CAPABILITY) {
        return Err(AdminError::PermissionDenied {
            user: ctx.user.clone(),
            capability: MANAGE_CAPABILITY.to_string(),
        });
    }

    let mut outcome = SubmissionOutcome::default();

    if let Some(id) = submission.delete {
        store.delete(id)?;
        info!("{} deleted mapping {}", ctx.user, id);
        outcome.deleted = Some(id);
        return Ok(outcome);
    }

    for (id, image) in &submission.updates {
        if let Some(image) = image {
            store.update(*id, *image)?;
            outcome.updated.push(*id);
        }
    }

    if let Some(NewMapping { slug, image: Some(image) }) = &submission.new_mapping {
        let slug = match slug.as_deref() {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => generated_slug(),
        };
        let id = store.add(&slug, *image)?;
        info!("{} mapped {} to image {}", ctx.user, slug, image);
        outcome.added = store.list()?.into_iter().find(|m| m.id == id);
    }

    Ok(outcome)
}
