use serde_json::json;

use crate::types::TopMatch;

impl TopMatch {
    /// Tab-separated JSON key and value, e.g. `"Milk"\t["Bread",1]`.
    pub fn to_json_line(&self) -> String {
        format!(
            "{}\t{}",
            json!(self.item),
            json!([self.partner, self.count])
        )
    }
}

/// One `item -> [partner, count]` record per line.
pub fn render_lines(top_matches: &[TopMatch]) -> String {
    top_matches
        .iter()
        .map(|top| format!("{}\n", top))
        .collect()
}

pub fn render_json_lines(top_matches: &[TopMatch]) -> String {
    top_matches
        .iter()
        .map(|top| format!("{}\n", top.to_json_line()))
        .collect()
}
