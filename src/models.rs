use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub kind: String,
    pub target: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemView {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistView {
    pub date: String,
    pub day_key: String,
    pub items: Vec<ItemView>,
    pub complete: bool,
}
