use ratatui::widgets::ListState;

use crate::source::Item;
use crate::sync::SyncStatus;

pub struct App {
    /// Snapshot of the last successfully-synced collection, in response
    /// order.  Replaced wholesale on every sync; never merged.
    pub items: Vec<Item>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// One-line sync status rendered in the status bar.
    pub status_line: String,
    /// Label of the configured source, shown in the list title.
    pub source_label: String,
    /// Set by the `r` key; drained by the main loop.
    refresh_requested: bool,
}

impl App {
    pub fn new(source_label: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            list_state: ListState::default(),
            quit: false,
            status_line: "starting…".into(),
            source_label: source_label.into(),
            refresh_requested: false,
        }
    }

    /// Replace the visible collection with a fresh sync result.
    ///
    /// The selection is clamped to the new length; if the list emptied, it
    /// is cleared.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        match self.list_state.selected() {
            Some(_) if self.items.is_empty() => self.list_state.select(None),
            Some(i) if i >= self.items.len() => {
                self.list_state.select(Some(self.items.len() - 1));
            }
            _ => {}
        }
    }

    /// Update the status bar from a sync status transition.
    pub fn set_status(&mut self, status: &SyncStatus) {
        self.status_line = status.describe();
    }

    // -- refresh -------------------------------------------------------------

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Consume a pending refresh request, if any.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(self.items.len() - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_item(id: u64, title: &str) -> Item {
        Item {
            id,
            title: title.to_string(),
            url: format!("https://x/{id}"),
        }
    }

    fn sample_items() -> Vec<Item> {
        vec![
            make_item(1, "PR merged"),
            make_item(2, "New issue"),
            make_item(3, "Review requested"),
        ]
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_empty() {
        let app = App::new("GitHub");
        assert!(app.items.is_empty());
        assert!(!app.quit);
        assert!(app.list_state.selected().is_none());
    }

    // -- set_items -----------------------------------------------------------

    #[test]
    fn set_items_replaces_the_previous_collection() {
        let mut app = App::new("GitHub");
        app.set_items(sample_items());
        app.set_items(vec![make_item(9, "Only one left")]);

        assert_eq!(app.items.len(), 1);
        assert_eq!(app.items[0].id, 9, "old items must not survive");
    }

    #[test]
    fn set_items_keeps_response_order() {
        let mut app = App::new("GitHub");
        app.set_items(sample_items());

        let ids: Vec<u64> = app.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn set_items_clamps_selection_when_list_shrinks() {
        let mut app = App::new("GitHub");
        app.set_items(sample_items());
        app.select_last(); // index 2

        app.set_items(vec![make_item(1, "Solo")]);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn set_items_clears_selection_when_list_empties() {
        let mut app = App::new("GitHub");
        app.set_items(sample_items());
        app.select_first();

        app.set_items(vec![]);
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn set_items_keeps_valid_selection() {
        let mut app = App::new("GitHub");
        app.set_items(sample_items());
        app.select_next(); // index 0

        app.set_items(sample_items());
        assert_eq!(app.list_state.selected(), Some(0));
    }

    // -- status --------------------------------------------------------------

    #[test]
    fn set_status_renders_into_the_status_line() {
        let mut app = App::new("GitHub");
        app.set_status(&SyncStatus::Failed {
            reason: "HTTP status 401".to_string(),
            at: Utc::now(),
        });
        assert!(app.status_line.contains("HTTP status 401"));
    }

    // -- refresh -------------------------------------------------------------

    #[test]
    fn refresh_request_is_consumed_once() {
        let mut app = App::new("GitHub");
        assert!(!app.take_refresh_request());

        app.request_refresh();
        assert!(app.take_refresh_request());
        assert!(!app.take_refresh_request(), "request drained on first take");
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn select_next_on_empty_is_noop() {
        let mut app = App::new("GitHub");
        app.select_next();
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn select_previous_on_empty_is_noop() {
        let mut app = App::new("GitHub");
        app.select_previous();
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn select_next_starts_at_zero_then_advances() {
        let mut app = App::new("GitHub");
        app.set_items(sample_items());

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(1));

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn select_next_clamps_at_last_item() {
        let mut app = App::new("GitHub");
        app.set_items(sample_items());

        app.select_last();
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn select_previous_clamps_at_zero() {
        let mut app = App::new("GitHub");
        app.set_items(sample_items());

        app.select_first();
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn select_first_and_last_jump() {
        let mut app = App::new("GitHub");
        app.set_items(sample_items());

        app.select_last();
        assert_eq!(app.list_state.selected(), Some(2));

        app.select_first();
        assert_eq!(app.list_state.selected(), Some(0));
    }
}
