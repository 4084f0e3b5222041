use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::error;

/// Id prefix every checklist item group carries.
pub const ITEM_PREFIX: &str = "button.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutItem {
    pub id: String,
    pub label: String,
}

/// What the board shows: items in document order, the label texts in order,
/// and which label each item mutes when it is checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistLayout {
    pub items: Vec<LayoutItem>,
    #[serde(default)]
    pub label_index: BTreeMap<String, usize>,
}

impl ChecklistLayout {
    /// Layout with one label per item, each item mapped to its own position.
    pub fn from_labels<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let items: Vec<LayoutItem> = labels
            .into_iter()
            .enumerate()
            .map(|(idx, label)| LayoutItem {
                id: format!("{ITEM_PREFIX}{}", idx + 1),
                label: label.into(),
            })
            .collect();
        let label_index = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();
        Self { items, label_index }
    }

    pub fn label_for(&self, item_id: &str) -> Option<usize> {
        self.label_index.get(item_id).copied()
    }
}

impl Default for ChecklistLayout {
    fn default() -> Self {
        Self::from_labels([
            "sunlight",
            "diaphragmatic breathing",
            "emotional connection with others",
            "movement",
            "setting boundaries",
            "decluttering",
            "awareness",
            "taking breaks",
            "saying \"no\"",
            "probiotics + fiber",
            "structure",
        ])
    }
}

pub async fn load_layout(path: &Path) -> ChecklistLayout {
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(layout) => layout,
            Err(err) => {
                error!("failed to parse layout file {}: {err}", path.display());
                ChecklistLayout::default()
            }
        },
        Err(err) => {
            error!("failed to read layout file {}: {err}", path.display());
            ChecklistLayout::default()
        }
    }
}
