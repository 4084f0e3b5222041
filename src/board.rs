use crate::layout::ChecklistLayout;
use crate::surface::ChecklistSurface;
use serde::Serialize;

pub const CHECKED_CLASS: &str = "is-checked";
pub const DONE_CLASS: &str = "is-done";
pub const CONGRATS_LINES: [&str; 2] = ["You did good for today", "See you tomorrow!"];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItemElement {
    pub id: String,
    pub classes: Vec<String>,
    pub role: Option<String>,
    pub tabindex: Option<i32>,
    pub aria_pressed: Option<bool>,
}

impl ItemElement {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabelElement {
    pub text: String,
    pub classes: Vec<String>,
    pub opacity: Option<String>,
}

impl LabelElement {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CongratsPanel {
    pub lines: [&'static str; 2],
    pub visible: bool,
}

/// In-memory model of the SVG checklist page.
#[derive(Debug, Clone, Default)]
pub struct SvgBoard {
    present: bool,
    items: Vec<ItemElement>,
    labels: Vec<LabelElement>,
    board_visible: bool,
    congrats: Option<CongratsPanel>,
    congrats_created: usize,
}

impl SvgBoard {
    pub fn from_layout(layout: &ChecklistLayout) -> Self {
        let items = layout
            .items
            .iter()
            .map(|item| ItemElement {
                id: item.id.clone(),
                classes: Vec::new(),
                role: None,
                tabindex: None,
                aria_pressed: None,
            })
            .collect();
        let labels = layout
            .items
            .iter()
            .map(|item| LabelElement {
                text: item.label.clone(),
                classes: Vec::new(),
                opacity: None,
            })
            .collect();

        Self {
            present: true,
            items,
            labels,
            board_visible: true,
            congrats: None,
            congrats_created: 0,
        }
    }

    /// A page without the checklist container.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ItemElement] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ItemElement> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn labels(&self) -> &[LabelElement] {
        &self.labels
    }

    pub fn board_visible(&self) -> bool {
        self.board_visible
    }

    pub fn congrats(&self) -> Option<&CongratsPanel> {
        self.congrats.as_ref()
    }

    pub fn congrats_visible(&self) -> bool {
        self.congrats.as_ref().is_some_and(|panel| panel.visible)
    }

    pub fn congrats_created(&self) -> usize {
        self.congrats_created
    }

    /// Drops the label at `index`, shifting later labels down.
    pub fn remove_label(&mut self, index: usize) {
        if index < self.labels.len() {
            self.labels.remove(index);
        }
    }
}

fn toggle_class(classes: &mut Vec<String>, class: &str, on: bool) {
    let has = classes.iter().any(|c| c == class);
    if on && !has {
        classes.push(class.to_string());
    } else if !on && has {
        classes.retain(|c| c != class);
    }
}

impl ChecklistSurface for SvgBoard {
    fn is_present(&self) -> bool {
        self.present
    }

    fn list_items(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    fn set_item_checked(&mut self, id: &str, checked: bool) {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return;
        };
        toggle_class(&mut item.classes, CHECKED_CLASS, checked);
        item.role = Some("button".to_string());
        item.tabindex = Some(0);
        item.aria_pressed = Some(checked);
    }

    fn read_item_checked(&self, id: &str) -> bool {
        self.item(id).is_some_and(|item| item.has_class(CHECKED_CLASS))
    }

    fn set_label_muted(&mut self, index: usize, muted: bool) -> bool {
        let Some(label) = self.labels.get_mut(index) else {
            return false;
        };
        toggle_class(&mut label.classes, DONE_CLASS, muted);
        label.opacity = Some(if muted { "0.5" } else { "1" }.to_string());
        true
    }

    fn set_board_visible(&mut self, visible: bool) {
        self.board_visible = visible;
    }

    fn set_congrats_visible(&mut self, visible: bool) {
        if self.congrats.is_none() {
            self.congrats_created += 1;
        }
        let panel = self.congrats.get_or_insert(CongratsPanel {
            lines: CONGRATS_LINES,
            visible: false,
        });
        panel.visible = visible;
    }
}
