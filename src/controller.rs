use crate::clock::Clock;
use crate::day_key::{day_key_for, DAY_KEY_PREFIX};
use crate::layout::ITEM_PREFIX;
use crate::store::KeyValueStore;
use crate::surface::ChecklistSurface;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Item id -> checked, as persisted for one day.
pub type DayState = BTreeMap<String, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetSchedule {
    /// Reset at the next local midnight.
    Midnight,
    /// Reset after a fixed interval.
    Every(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    PointerUp { target: Option<String> },
    KeyDown { target: Option<String>, key: String },
}

pub struct ChecklistController<S, U, C> {
    store: S,
    surface: U,
    clock: C,
    label_index: BTreeMap<String, usize>,
    key_prefix: String,
    schedule: ResetSchedule,
    armed_key: Option<String>,
    attached: bool,
}

impl<S, U, C> ChecklistController<S, U, C>
where
    S: KeyValueStore,
    U: ChecklistSurface,
    C: Clock,
{
    pub fn new(store: S, surface: U, clock: C, label_index: BTreeMap<String, usize>) -> Self {
        Self {
            store,
            surface,
            clock,
            label_index,
            key_prefix: DAY_KEY_PREFIX.to_string(),
            schedule: ResetSchedule::Midnight,
            armed_key: None,
            attached: false,
        }
    }

    pub fn with_schedule(mut self, schedule: ResetSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn today_key(&self) -> String {
        day_key_for(&self.key_prefix, self.clock.now().date())
    }

    pub fn load_state(&self, day_key: &str) -> DayState {
        let Some(raw) = self.store.get(day_key) else {
            return DayState::new();
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!("ignoring unreadable checklist state under {day_key}: {err}");
                DayState::new()
            }
        }
    }

    pub fn save_state(&mut self, day_key: &str, state: &DayState) {
        match serde_json::to_string(state) {
            Ok(raw) => self.store.set(day_key, raw),
            Err(err) => warn!("failed to encode checklist state: {err}"),
        }
    }

    pub fn discover_items(&self) -> Vec<String> {
        self.surface
            .list_items()
            .into_iter()
            .filter(|id| id.starts_with(ITEM_PREFIX))
            .collect()
    }

    pub fn apply_checked(&mut self, id: &str, checked: bool) {
        self.surface.set_item_checked(id, checked);
    }

    pub fn read_checked(&self, id: &str) -> bool {
        self.surface.read_item_checked(id)
    }

    pub fn mirror_label(&mut self, id: &str, checked: bool) {
        let Some(&index) = self.label_index.get(id) else {
            return;
        };
        if !self.surface.set_label_muted(index, checked) {
            debug!("no label at position {index} for {id}");
        }
    }

    pub fn sync_labels(&mut self) {
        for id in self.discover_items() {
            let checked = self.read_checked(&id);
            self.mirror_label(&id, checked);
        }
    }

    pub fn compute_completion(&self) -> bool {
        let items = self.discover_items();
        !items.is_empty() && items.iter().all(|id| self.read_checked(id))
    }

    pub fn apply_completion_ui(&mut self, complete: bool) {
        self.surface.set_board_visible(!complete);
        self.surface.set_congrats_visible(complete);
    }

    fn refresh_completion(&mut self) -> bool {
        let complete = self.compute_completion();
        self.apply_completion_ui(complete);
        complete
    }

    /// Flips one item and writes the result through to today's record.
    /// Returns the new checked state, or `None` for an unknown item.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        if !self.discover_items().iter().any(|item| item == id) {
            return None;
        }

        let next = !self.read_checked(id);
        self.apply_checked(id, next);
        self.mirror_label(id, next);

        let key = self.today_key();
        let mut state = self.load_state(&key);
        state.insert(id.to_string(), next);
        self.save_state(&key, &state);

        let complete = self.refresh_completion();
        debug!(item = id, checked = next, complete, "toggled");
        Some(next)
    }

    /// Arms the next reset and returns how long until it is due.
    pub fn schedule_reset(&mut self) -> Duration {
        self.armed_key = Some(self.today_key());
        match self.schedule {
            ResetSchedule::Midnight => self.clock.until_midnight(),
            ResetSchedule::Every(interval) => interval,
        }
    }

    /// Clears the day: drops the record armed at scheduling time and the one
    /// for the current day, then unchecks everything.
    pub fn run_reset(&mut self) {
        let current = self.today_key();
        if let Some(armed) = self.armed_key.take() {
            if armed != current {
                self.store.remove(&armed);
            }
        }
        self.store.remove(&current);

        for id in self.discover_items() {
            self.apply_checked(&id, false);
        }
        self.sync_labels();
        self.refresh_completion();
        info!(day = %current, "checklist reset");
    }

    /// Applies today's record to the surface and starts accepting input.
    /// Returns false, leaving everything untouched, when there is no surface.
    pub fn initialize(&mut self) -> bool {
        if !self.surface.is_present() {
            warn!("checklist surface not found, leaving page as is");
            return false;
        }

        let key = self.today_key();
        let state = self.load_state(&key);
        for id in self.discover_items() {
            let checked = state.get(&id).copied().unwrap_or(false);
            self.apply_checked(&id, checked);
        }
        self.sync_labels();
        self.attached = true;
        self.refresh_completion();
        info!(day = %key, items = self.discover_items().len(), "checklist ready");
        true
    }

    /// Routes pointer release and Enter/Space on an item to `toggle`.
    /// Returns true when the event was consumed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.attached {
            return false;
        }
        let target = match event {
            InputEvent::PointerUp { target } => target,
            InputEvent::KeyDown { target, key } => {
                if key != "Enter" && key != " " {
                    return false;
                }
                target
            }
        };
        match target {
            Some(id) if id.starts_with(ITEM_PREFIX) => self.toggle(&id).is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{SvgBoard, DONE_CLASS};
    use crate::clock::FixedClock;
    use crate::layout::ChecklistLayout;
    use crate::store::{KeyValueStore, MemoryStore};
    use chrono::{NaiveDate, NaiveDateTime};

    type TestController = ChecklistController<MemoryStore, SvgBoard, FixedClock>;

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn controller_with(store: MemoryStore, labels: &[&str]) -> TestController {
        let layout = ChecklistLayout::from_labels(labels.iter().copied());
        ChecklistController::new(
            store,
            SvgBoard::from_layout(&layout),
            FixedClock::new(noon(5)),
            layout.label_index,
        )
    }

    fn ready(labels: &[&str]) -> TestController {
        let mut controller = controller_with(MemoryStore::default(), labels);
        assert!(controller.initialize());
        assert!(controller.is_attached());
        controller
    }

    const KEY: &str = "regulation_dailychecklist_state_2024-03-05";

    #[test]
    fn fresh_day_starts_unchecked() {
        let controller = ready(&["a", "b", "c"]);
        for id in controller.discover_items() {
            assert!(!controller.read_checked(&id));
        }
        assert!(controller.surface().board_visible());
        assert!(!controller.surface().congrats_visible());
    }

    #[test]
    fn initialize_applies_persisted_state() {
        let mut store = MemoryStore::default();
        store.set(KEY, r#"{"button.2":true,"button.9":true}"#.to_string());
        let mut controller = controller_with(store, &["a", "b", "c"]);
        controller.initialize();

        assert!(!controller.read_checked("button.1"));
        assert!(controller.read_checked("button.2"));
        assert!(controller.surface().labels()[1].has_class(DONE_CLASS));
        assert_eq!(controller.surface().labels()[0].opacity.as_deref(), Some("1"));
    }

    #[test]
    fn corrupt_state_reads_as_empty() {
        let mut store = MemoryStore::default();
        store.set(KEY, "{not json".to_string());
        let mut controller = controller_with(store, &["a"]);
        assert!(controller.load_state(KEY).is_empty());
        controller.initialize();
        assert!(!controller.read_checked("button.1"));

        let mut store = MemoryStore::default();
        store.set(KEY, r#"{"button.1":"yes"}"#.to_string());
        let controller = controller_with(store, &["a"]);
        assert!(controller.load_state(KEY).is_empty());
    }

    #[test]
    fn toggle_twice_restores_state_and_record() {
        let mut controller = ready(&["a", "b"]);
        assert_eq!(controller.toggle("button.1"), Some(true));
        assert!(controller.read_checked("button.1"));
        assert_eq!(controller.load_state(KEY).get("button.1"), Some(&true));
        assert!(controller.surface().labels()[0].has_class(DONE_CLASS));

        assert_eq!(controller.toggle("button.1"), Some(false));
        assert!(!controller.read_checked("button.1"));
        assert_eq!(controller.load_state(KEY).get("button.1"), Some(&false));
        assert!(!controller.surface().labels()[0].has_class(DONE_CLASS));
    }

    #[test]
    fn toggle_unknown_item_is_noop() {
        let mut controller = ready(&["a"]);
        assert_eq!(controller.toggle("button.7"), None);
        assert!(controller.store().get(KEY).is_none());
    }

    #[test]
    fn completion_needs_items() {
        let controller = ready(&[]);
        assert!(!controller.compute_completion());
    }

    #[test]
    fn all_checked_shows_congrats_and_back() {
        let mut controller = ready(&["a", "b", "c"]);
        for id in ["button.1", "button.2", "button.3"] {
            controller.toggle(id);
        }
        assert!(controller.compute_completion());
        assert!(!controller.surface().board_visible());
        assert!(controller.surface().congrats_visible());

        controller.toggle("button.2");
        assert!(!controller.compute_completion());
        assert!(controller.surface().board_visible());
        assert!(!controller.surface().congrats_visible());
        assert_eq!(controller.surface().congrats_created(), 1);
    }

    #[test]
    fn completion_ui_is_idempotent() {
        let mut controller = ready(&["a"]);
        controller.apply_completion_ui(true);
        controller.apply_completion_ui(true);
        assert!(controller.surface().congrats_visible());
        assert!(!controller.surface().board_visible());
        assert_eq!(controller.surface().congrats_created(), 1);
    }

    #[test]
    fn unmapped_items_and_missing_labels_are_skipped() {
        let layout = ChecklistLayout::from_labels(["a", "b"]);
        let mut index = layout.label_index.clone();
        index.remove("button.1");
        let mut board = SvgBoard::from_layout(&layout);
        board.remove_label(1);
        let mut controller =
            ChecklistController::new(MemoryStore::default(), board, FixedClock::new(noon(5)), index);
        controller.initialize();

        assert_eq!(controller.toggle("button.1"), Some(true));
        assert_eq!(controller.toggle("button.2"), Some(true));
        assert!(!controller.surface().labels()[0].has_class(DONE_CLASS));
    }

    #[test]
    fn reset_clears_prior_day_and_unchecks() {
        let mut controller = ready(&["a", "b"]);
        controller.toggle("button.1");
        controller.toggle("button.2");
        assert!(controller.surface().congrats_visible());

        let delay = controller.schedule_reset();
        assert_eq!(delay.as_secs(), 12 * 60 * 60);
        controller.clock().set(noon(6).date().and_hms_opt(0, 0, 0).unwrap());
        controller.run_reset();

        assert!(controller.store().get(KEY).is_none());
        for id in controller.discover_items() {
            assert!(!controller.read_checked(&id));
        }
        assert!(controller.surface().board_visible());
        assert!(!controller.surface().congrats_visible());
        assert!(!controller.surface().labels()[0].has_class(DONE_CLASS));
    }

    #[test]
    fn reset_removes_current_day_record() {
        let mut controller = ready(&["a"]);
        controller.toggle("button.1");
        controller.run_reset();
        assert!(controller.store().get(KEY).is_none());
    }

    #[test]
    fn interval_schedule_ignores_clock() {
        let mut controller = ready(&["a"]).with_schedule(ResetSchedule::Every(Duration::from_secs(10)));
        assert_eq!(controller.schedule_reset(), Duration::from_secs(10));
    }

    #[test]
    fn detached_surface_declines_to_attach() {
        let mut controller = ChecklistController::new(
            MemoryStore::default(),
            SvgBoard::detached(),
            FixedClock::new(noon(5)),
            BTreeMap::new(),
        );
        assert!(!controller.initialize());
        assert!(!controller.is_attached());
        assert!(!controller.handle_input(InputEvent::PointerUp {
            target: Some("button.1".into())
        }));
    }

    #[test]
    fn input_routes_pointer_and_activation_keys() {
        let mut controller = ready(&["a"]);
        assert!(controller.handle_input(InputEvent::PointerUp {
            target: Some("button.1".into())
        }));
        assert!(controller.read_checked("button.1"));

        assert!(controller.handle_input(InputEvent::KeyDown {
            target: Some("button.1".into()),
            key: " ".into()
        }));
        assert!(!controller.read_checked("button.1"));

        assert!(controller.handle_input(InputEvent::KeyDown {
            target: Some("button.1".into()),
            key: "Enter".into()
        }));
        assert!(!controller.handle_input(InputEvent::KeyDown {
            target: Some("button.1".into()),
            key: "a".into()
        }));
        assert!(!controller.handle_input(InputEvent::PointerUp { target: None }));
        assert!(!controller.handle_input(InputEvent::PointerUp {
            target: Some("page".into())
        }));
        assert!(controller.read_checked("button.1"));
    }

    #[test]
    fn toggle_uses_current_day_record() {
        let mut controller = ready(&["a", "b"]);
        controller.toggle("button.1");
        controller.clock().set(noon(6));
        controller.toggle("button.2");

        let next = "regulation_dailychecklist_state_2024-03-06";
        let state = controller.load_state(next);
        assert_eq!(state.get("button.2"), Some(&true));
        assert_eq!(state.get("button.1"), None);
    }
}
