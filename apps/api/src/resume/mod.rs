// Resume builder: schema-driven form state, reducer, and plain-text print preview.

pub mod handlers;
pub mod preview;
pub mod sample;
pub mod schema;
pub mod store;

use chrono::{DateTime, Utc};

pub use schema::ResumeVariant;
pub use store::FormState;

/// One editor instance: a variant plus the current form snapshot.
#[derive(Debug, Clone)]
pub struct ResumeDraft {
    pub variant: ResumeVariant,
    pub state: FormState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeDraft {
    pub fn new(variant: ResumeVariant, state: FormState) -> Self {
        let now = Utc::now();
        ResumeDraft {
            variant,
            state,
            created_at: now,
            updated_at: now,
        }
    }
}
