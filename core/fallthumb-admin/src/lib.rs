//! Administrative operations on the slug mapping table.
//!
//! The admin screen itself is host markup. This crate holds the parts with
//! behaviour: applying a submitted form to the store and reporting which
//! mappings are usable at the required size.

mod error;
mod report;
mod submission;

pub use error::{AdminError, AdminResult};
pub use report::{MappingEntry, MappingReport};
pub use submission::{
    AdminContext, AdminSubmission, MANAGE_CAPABILITY, NewMapping, SubmissionOutcome,
    generated_slug, process_submission,
};
