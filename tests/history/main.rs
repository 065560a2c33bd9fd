mod store;

use serde_json::json;
use skillplan::history::types::HistoryEntry;

pub fn entry(id: &str, skill: &str, timestamp: &str) -> HistoryEntry {
    HistoryEntry {
        id: id.to_string(),
        skill: skill.to_string(),
        duration: "1 year".to_string(),
        timestamp_raw: timestamp.to_string(),
        curriculum: json!([]),
    }
}
