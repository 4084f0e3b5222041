/// The document the checklist lives in, reduced to what the controller needs.
///
/// Item lookups go through ids and are always answered from the current
/// state of the surface; implementations must not cache the item list.
pub trait ChecklistSurface {
    /// Whether the checklist container exists at all.
    fn is_present(&self) -> bool;

    /// Ids of all item elements, in document order.
    fn list_items(&self) -> Vec<String>;

    /// Sets the checked marker and the accessible toggle attributes.
    fn set_item_checked(&mut self, id: &str, checked: bool);

    fn read_item_checked(&self, id: &str) -> bool;

    /// Mutes or restores the label at `index`. Returns false when there is no
    /// label at that position.
    fn set_label_muted(&mut self, index: usize, muted: bool) -> bool;

    fn set_board_visible(&mut self, visible: bool);

    /// Shows or hides the congratulation panel, creating it on first use.
    fn set_congrats_visible(&mut self, visible: bool);
}
