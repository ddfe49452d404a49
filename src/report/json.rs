use crate::report::BatchSummary;

pub fn render_summary_json(summary: &BatchSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
