use crate::models::{GistSummary, RawGist};

pub const NO_DESCRIPTION: &str = "No description";

// Reduce raw GitHub records to summaries, same order as input
pub fn simplify(records: &[RawGist]) -> Vec<GistSummary> {
    records.iter().map(simplify_one).collect()
}

fn simplify_one(raw: &RawGist) -> GistSummary {
    GistSummary {
        id: raw.id.clone(),
        description: raw
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        public: raw.public.unwrap_or(true),
        // order follows the upstream mapping
        files: raw
            .files
            .as_ref()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default(),
        url: raw.html_url.clone(),
        created_at: raw.created_at.clone(),
        updated_at: raw.updated_at.clone(),
    }
}
