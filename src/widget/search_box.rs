//! Search Box: Debounced autocomplete over an injected lookup service.
//!
//! The widget owns only transient state — the suggestion list, the loading
//! flag, and the empty-search error flag. The canonical query value lives
//! upstream: every edit is forwarded raw through
//! [`SearchReporter::on_query_change`], and a finalized term through
//! [`SearchReporter::on_commit`]. Suggestion fetches are debounced through
//! the timer actor's `Debounce` slot and executed by the lookup actor.
//!
//! A fetch already in flight is never cancelled; its settle message is
//! applied unconditionally when it arrives, even if a newer fetch has been
//! dispatched since.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use unicode_width::UnicodeWidthStr;

use super::spinner::Spinner;
use super::text_field::{TextField, TextFieldConfig};
use super::traits::Widget;
use crate::actor::{
    InputEvent, KeyCode, LookupCmd, LookupReply, MouseEvent, TimerCmd, TimerFired, TimerSlot,
};
use crate::buffer::{Buffer, Cell, Modifiers, Rgb};
use crate::layout::Rect;

/// Callbacks through which the search box reports to its owner.
///
/// The owner holds the canonical query value and decides what a committed
/// search means; the widget only notifies.
pub trait SearchReporter: Send + Sync {
    /// Called with the raw (untrimmed) text after every edit.
    fn on_query_change(&self, query: &str);

    /// Called with the final search term when a search is committed.
    fn on_commit(&self, term: &str);
}

/// Configuration for the search box widget.
#[derive(Debug, Clone)]
pub struct SearchBoxConfig {
    /// Quiet window after the last edit before a suggestion fetch runs.
    pub debounce_window: Duration,
    /// Delay after activation before the widget claims focus (and
    /// auto-searches a pre-filled query).
    pub startup_focus_delay: Duration,
    /// Placeholder text shown while the field is empty.
    pub placeholder: String,
    /// Prompt prefix for the input row.
    pub prompt: String,
    /// Label of the committing button.
    pub button_label: String,
    /// Message shown after a search attempt with blank text.
    pub empty_search_message: String,
    /// Text color.
    pub fg: Rgb,
    /// Widget background.
    pub bg: Rgb,
    /// Accent color (prompt, cursor, spinner, button).
    pub accent: Rgb,
    /// Color of the empty-search message.
    pub error_fg: Rgb,
    /// Placeholder color.
    pub placeholder_fg: Rgb,
    /// Suggestion entry text color.
    pub suggestion_fg: Rgb,
    /// Suggestion list background ("autocomplete active" styling).
    pub suggestion_bg: Rgb,
    /// Button color while disabled.
    pub disabled_fg: Rgb,
}

impl Default for SearchBoxConfig {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(500),
            startup_focus_delay: Duration::from_millis(100),
            placeholder: String::from("Search articles"),
            prompt: String::from("> "),
            button_label: String::from("Search"),
            empty_search_message: String::from("Enter a search term"),
            fg: Rgb::WHITE,
            bg: Rgb::new(30, 30, 30),
            accent: Rgb::new(0, 255, 255),
            error_fg: Rgb::new(255, 110, 110),
            placeholder_fg: Rgb::new(100, 100, 100),
            suggestion_fg: Rgb::WHITE,
            suggestion_bg: Rgb::new(45, 45, 70),
            disabled_fg: Rgb::new(100, 100, 100),
        }
    }
}

/// A search input with debounced autocomplete suggestions.
pub struct SearchBox {
    bounds: Rect,
    config: SearchBoxConfig,
    /// Locale/site identifier scoping every lookup.
    locale: String,
    field: TextField,
    spinner: Spinner,
    /// Current suggestion list, replaced wholesale on every settle.
    suggestions: Vec<String>,
    /// True while a fetch is in flight.
    loading: bool,
    /// True after a search attempt with blank text.
    empty_search_error: bool,
    /// Externally supplied: suppresses fetches and commits.
    disabled: bool,
    /// The query the debounce slot will dispatch when it fires.
    pending_fetch: Option<String>,
    timer_tx: Sender<TimerCmd>,
    lookup_tx: Sender<LookupCmd>,
    reporter: Arc<dyn SearchReporter>,
    dirty: bool,
}

impl SearchBox {
    /// Create a search box and arm its startup-focus timer.
    ///
    /// `timer_tx` and `lookup_tx` come from [`crate::actor::TimerActor`]
    /// and [`crate::actor::LookupActor`]; their fired/settled messages must
    /// be routed back through [`SearchBox::on_timer`] and
    /// [`SearchBox::on_suggestions`].
    pub fn new(
        bounds: Rect,
        config: SearchBoxConfig,
        locale: impl Into<String>,
        timer_tx: Sender<TimerCmd>,
        lookup_tx: Sender<LookupCmd>,
        reporter: Arc<dyn SearchReporter>,
    ) -> Self {
        let field_config = TextFieldConfig {
            fg: config.fg,
            bg: config.bg,
            cursor_fg: config.accent,
            placeholder: config.placeholder.clone(),
            placeholder_fg: config.placeholder_fg,
            prompt: config.prompt.clone(),
            prompt_fg: config.accent,
        };
        let spinner = Spinner::new(config.accent, config.bg);

        // The on-ready hook: focus (and auto-search a pre-filled query)
        // after a short settle delay.
        let _ = timer_tx.send(TimerCmd::Arm {
            slot: TimerSlot::Startup,
            delay: config.startup_focus_delay,
        });

        let mut search = Self {
            bounds,
            config,
            locale: locale.into(),
            field: TextField::with_config(Rect::ZERO, field_config),
            spinner,
            suggestions: Vec::new(),
            loading: false,
            empty_search_error: false,
            disabled: false,
            pending_fetch: None,
            timer_tx,
            lookup_tx,
            reporter,
            dirty: true,
        };
        search.field.set_bounds(search.field_rect());
        search
    }

    // -------------------------------------------------------------------
    // Caller-owned state
    // -------------------------------------------------------------------

    /// The widget's mirror of the upstream query value.
    pub fn query(&self) -> &str {
        self.field.content()
    }

    /// Update the mirrored query from upstream.
    ///
    /// Never schedules a fetch and never echoes back through the reporter;
    /// the caller already knows. The empty-search error clears if the new
    /// value is non-blank.
    pub fn set_query(&mut self, query: &str) {
        self.field.set_content(query);
        self.refresh_error_flag();
        self.dirty = true;
    }

    /// Set the externally supplied disabled flag.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.dirty = true;
    }

    /// Check the disabled flag.
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    // -------------------------------------------------------------------
    // Widget-owned state
    // -------------------------------------------------------------------

    /// The current suggestion list.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// True while a suggestion fetch is in flight.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// True after a search attempt with blank text.
    pub const fn has_empty_search_error(&self) -> bool {
        self.empty_search_error
    }

    /// The "autocomplete active" styling state.
    pub fn autocomplete_active(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Whether the input field has focus.
    pub const fn is_focused(&self) -> bool {
        self.field.is_focused()
    }

    // -------------------------------------------------------------------
    // Flows
    // -------------------------------------------------------------------

    /// Explicit search trigger: the button, or Enter while focused.
    ///
    /// Blank (whitespace-only) text raises the empty-search error and
    /// re-focuses the input instead of committing. Otherwise the error and
    /// the suggestion list clear and the *untrimmed* text is committed.
    pub fn submit(&mut self) {
        if self.disabled {
            return;
        }
        self.dirty = true;
        if self.field.content().trim().is_empty() {
            self.empty_search_error = true;
            self.field.set_focused(true);
            return;
        }
        self.empty_search_error = false;
        self.suggestions.clear();
        let term = self.field.content().to_string();
        self.reporter.on_commit(&term);
    }

    /// Suggestion selection: commits the entry immediately.
    ///
    /// Bypasses validation and the fetch pipeline: the text mirror becomes
    /// the suggestion, both reporter callbacks fire, and the list clears.
    /// A no-op while disabled or when the index is out of range.
    pub fn choose(&mut self, index: usize) {
        if self.disabled {
            return;
        }
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            return;
        };
        self.field.set_content(&suggestion);
        self.reporter.on_query_change(&suggestion);
        self.reporter.on_commit(&suggestion);
        self.suggestions.clear();
        self.empty_search_error = false;
        self.dirty = true;
    }

    /// Route a fired timer slot into the widget.
    pub fn on_timer(&mut self, fired: TimerFired) {
        match fired.slot {
            TimerSlot::Startup => self.on_ready(),
            TimerSlot::Debounce => self.dispatch_pending_fetch(),
        }
    }

    /// Apply a settled suggestion fetch.
    ///
    /// Applied unconditionally: a reply for a superseded query still
    /// replaces the list (there is no request-generation guard). Failures
    /// degrade to an empty list and are only logged.
    pub fn on_suggestions(&mut self, reply: LookupReply) {
        self.loading = false;
        self.dirty = true;
        self.suggestions = match reply.result {
            Ok(items) => items,
            Err(err) => {
                log::debug!("suggestion lookup failed for {:?}: {err}", reply.query);
                Vec::new()
            }
        };
    }

    /// Advance one animation frame (cursor blink, spinner).
    pub fn tick(&mut self) {
        self.field.tick();
        if self.loading {
            self.spinner.advance();
            self.dirty = true;
        }
    }

    /// On-ready hook, fired by the startup timer: claim focus, and if the
    /// mirrored query is already non-blank, commit its trimmed value.
    fn on_ready(&mut self) {
        self.field.set_focused(true);
        self.dirty = true;
        let trimmed = self.field.content().trim();
        if !trimmed.is_empty() {
            let term = trimmed.to_string();
            self.reporter.on_commit(&term);
        }
    }

    /// The debounce window elapsed: dispatch the last pending query.
    fn dispatch_pending_fetch(&mut self) {
        if let Some(query) = self.pending_fetch.take() {
            self.loading = true;
            self.dirty = true;
            let _ = self.lookup_tx.send(LookupCmd::Fetch {
                query,
                locale: self.locale.clone(),
            });
        }
    }

    /// The field content changed through user input.
    fn text_edited(&mut self) {
        self.dirty = true;
        let text = self.field.content().to_string();
        self.reporter.on_query_change(&text);
        self.refresh_error_flag();
        if self.disabled {
            return;
        }
        if text.is_empty() {
            // Deletion fast path: clear synchronously, no debounce. The
            // debounce slot is left alone, matching lodash semantics: an
            // earlier keystroke's window still fires with its own query.
            self.suggestions.clear();
        } else {
            self.pending_fetch = Some(text);
            let _ = self.timer_tx.send(TimerCmd::Arm {
                slot: TimerSlot::Debounce,
                delay: self.config.debounce_window,
            });
        }
    }

    /// The error flag clears whenever the query becomes non-blank,
    /// regardless of where the change came from.
    fn refresh_error_flag(&mut self) {
        if self.empty_search_error && !self.field.content().trim().is_empty() {
            self.empty_search_error = false;
            self.dirty = true;
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.button_rect().contains(mouse.x, mouse.y) {
            // Inert while disabled; submit() checks
            self.submit();
            return true;
        }
        if self.field.bounds().contains(mouse.x, mouse.y) {
            self.field.set_focused(true);
            self.dirty = true;
            return true;
        }
        if let Some(index) = self.suggestion_index_at(mouse.x, mouse.y) {
            self.choose(index);
            return true;
        }
        false
    }

    // -------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------

    fn button_width(&self) -> u16 {
        #[allow(clippy::cast_possible_truncation)]
        let label = UnicodeWidthStr::width(self.config.button_label.as_str()) as u16;
        label + 4 // "[ " + " ]"
    }

    fn button_rect(&self) -> Rect {
        let width = self.button_width().min(self.bounds.width);
        Rect::new(self.bounds.right().saturating_sub(width), self.bounds.y, width, 1)
    }

    fn spinner_x(&self) -> u16 {
        self.button_rect().x.saturating_sub(2)
    }

    fn field_rect(&self) -> Rect {
        let width = self
            .spinner_x()
            .saturating_sub(self.bounds.x)
            .saturating_sub(1);
        Rect::new(self.bounds.x, self.bounds.y, width, 1)
    }

    fn visible_suggestions(&self) -> usize {
        let rows = self.bounds.height.saturating_sub(1) as usize;
        self.suggestions.len().min(rows)
    }

    fn suggestion_index_at(&self, x: u16, y: u16) -> Option<usize> {
        if !self.bounds.contains(x, y) || y == self.bounds.y {
            return None;
        }
        let index = (y - self.bounds.y - 1) as usize;
        (index < self.visible_suggestions()).then_some(index)
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    fn render_button(&self, buffer: &mut Buffer) {
        let rect = self.button_rect();
        let (fg, mods) = if self.disabled {
            (self.config.disabled_fg, Modifiers::DIM)
        } else {
            (self.config.accent, Modifiers::BOLD)
        };
        let label = format!("[ {} ]", self.config.button_label);
        buffer.draw_text_styled(rect.x, rect.y, &label, fg, self.config.bg, mods);
    }

    fn render_dropdown(&self, buffer: &mut Buffer) {
        let rows = self.bounds.height.saturating_sub(1);

        if self.empty_search_error {
            // Mutually exclusive with suggestions: a search attempt always
            // cleared the list first
            if rows > 0 {
                let row = self.bounds.row(1);
                buffer.fill_rect(row, Cell::new(' ').with_bg(self.config.bg));
                buffer.draw_text_styled(
                    row.x,
                    row.y,
                    &self.config.empty_search_message,
                    self.config.error_fg,
                    self.config.bg,
                    Modifiers::ITALIC,
                );
            }
            for i in 1..rows {
                buffer.fill_rect(self.bounds.row(1 + i), Cell::EMPTY);
            }
            return;
        }

        let shown = self.visible_suggestions();
        for i in 0..rows as usize {
            #[allow(clippy::cast_possible_truncation)]
            let row = self.bounds.row(1 + i as u16);
            if i < shown {
                buffer.fill_rect(row, Cell::new(' ').with_bg(self.config.suggestion_bg));
                buffer.draw_text(
                    row.x + 1,
                    row.y,
                    &self.suggestions[i],
                    self.config.suggestion_fg,
                    self.config.suggestion_bg,
                );
            } else {
                buffer.fill_rect(row, Cell::EMPTY);
            }
        }
    }
}

impl Widget for SearchBox {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.field.set_bounds(self.field_rect());
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        self.field.render(buffer);

        // Gap between the field and the button, spinner cell included
        let y = self.bounds.y;
        for x in self.field_rect().right()..self.button_rect().x {
            buffer.set(x, y, Cell::new(' ').with_bg(self.config.bg));
        }
        if self.loading {
            self.spinner.render_at(buffer, self.spinner_x(), y);
        }

        self.render_button(buffer);
        self.render_dropdown(buffer);
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key {
                code: KeyCode::Enter,
                ..
            } => {
                if self.field.is_focused() {
                    self.submit();
                    true
                } else {
                    false
                }
            }
            InputEvent::MouseDown(mouse) => self.handle_mouse(*mouse),
            _ => {
                let before = self.field.content().to_string();
                let consumed = self.field.handle_input(event);
                if consumed && self.field.content() != before {
                    self.text_edited();
                }
                consumed
            }
        }
    }

    fn needs_redraw(&self) -> bool {
        self.dirty || self.field.needs_redraw()
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
        self.field.clear_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{KeyModifiers, MouseButton};
    use crossbeam_channel::{unbounded, Receiver};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingReporter {
        changes: Mutex<Vec<String>>,
        commits: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        fn changes(&self) -> Vec<String> {
            self.changes.lock().unwrap().clone()
        }

        fn commits(&self) -> Vec<String> {
            self.commits.lock().unwrap().clone()
        }
    }

    impl SearchReporter for RecordingReporter {
        fn on_query_change(&self, query: &str) {
            self.changes.lock().unwrap().push(query.to_string());
        }

        fn on_commit(&self, term: &str) {
            self.commits.lock().unwrap().push(term.to_string());
        }
    }

    struct Fixture {
        search: SearchBox,
        timer_rx: Receiver<TimerCmd>,
        lookup_rx: Receiver<LookupCmd>,
        reporter: Arc<RecordingReporter>,
    }

    /// A widget that has not yet processed its startup fire.
    fn raw_fixture() -> Fixture {
        let (timer_tx, timer_rx) = unbounded();
        let (lookup_tx, lookup_rx) = unbounded();
        let reporter = Arc::new(RecordingReporter::default());
        let search = SearchBox::new(
            Rect::new(0, 0, 60, 8),
            SearchBoxConfig::default(),
            "en",
            timer_tx,
            lookup_tx,
            reporter.clone(),
        );
        Fixture {
            search,
            timer_rx,
            lookup_rx,
            reporter,
        }
    }

    /// A widget past startup: focused, startup arm drained.
    fn fixture() -> Fixture {
        let mut f = raw_fixture();
        f.search.on_timer(TimerFired {
            slot: TimerSlot::Startup,
        });
        while f.timer_rx.try_recv().is_ok() {}
        f
    }

    fn type_str(search: &mut SearchBox, text: &str) {
        for c in text.chars() {
            search.handle_input(&InputEvent::Key {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE,
            });
        }
    }

    fn press_enter(search: &mut SearchBox) {
        search.handle_input(&InputEvent::Key {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn press_backspace(search: &mut SearchBox) {
        search.handle_input(&InputEvent::Key {
            code: KeyCode::Backspace,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn fire_debounce(search: &mut SearchBox) {
        search.on_timer(TimerFired {
            slot: TimerSlot::Debounce,
        });
    }

    fn settle_ok(search: &mut SearchBox, query: &str, items: &[&str]) {
        search.on_suggestions(LookupReply {
            query: query.to_string(),
            result: Ok(items.iter().map(ToString::to_string).collect()),
        });
    }

    fn settle_err(search: &mut SearchBox, query: &str) {
        search.on_suggestions(LookupReply {
            query: query.to_string(),
            result: Err("boom".into()),
        });
    }

    #[test]
    fn test_empty_input_clears_suggestions_without_fetch() {
        let mut f = fixture();
        type_str(&mut f.search, "do");
        settle_ok(&mut f.search, "do", &["Dog", "Dogs"]);
        assert_eq!(f.search.suggestions().len(), 2);

        press_backspace(&mut f.search);
        press_backspace(&mut f.search);

        assert_eq!(f.search.query(), "");
        assert!(f.search.suggestions().is_empty());
        // The deletion itself dispatched nothing
        assert!(f.lookup_rx.try_recv().is_err());
    }

    #[test]
    fn test_debounce_coalesces_to_last_query() {
        let mut f = fixture();
        type_str(&mut f.search, "dog");

        // Every edit re-armed the shared slot
        let arms = f.timer_rx.try_iter().count();
        assert_eq!(arms, 3);

        fire_debounce(&mut f.search);

        match f.lookup_rx.try_recv() {
            Ok(LookupCmd::Fetch { query, locale }) => {
                assert_eq!(query, "dog");
                assert_eq!(locale, "en");
            }
            other => panic!("expected one fetch, got {other:?}"),
        }
        assert!(f.lookup_rx.try_recv().is_err());
        assert!(f.search.is_loading());
    }

    #[test]
    fn test_debounce_fire_without_pending_is_noop() {
        let mut f = fixture();
        fire_debounce(&mut f.search);
        assert!(!f.search.is_loading());
        assert!(f.lookup_rx.try_recv().is_err());
    }

    #[test]
    fn test_empty_search_never_commits() {
        let mut f = fixture();
        press_enter(&mut f.search);
        assert!(f.reporter.commits().is_empty());
        assert!(f.search.has_empty_search_error());

        let mut f = fixture();
        type_str(&mut f.search, "   ");
        press_enter(&mut f.search);
        assert!(f.reporter.commits().is_empty());
        assert!(f.search.has_empty_search_error());
        assert!(f.search.is_focused());
    }

    #[test]
    fn test_error_clears_on_nonblank_input() {
        let mut f = fixture();
        press_enter(&mut f.search);
        assert!(f.search.has_empty_search_error());

        type_str(&mut f.search, "x");
        assert!(!f.search.has_empty_search_error());
    }

    #[test]
    fn test_error_persists_while_still_blank() {
        let mut f = fixture();
        press_enter(&mut f.search);
        type_str(&mut f.search, " ");
        assert!(f.search.has_empty_search_error());
    }

    #[test]
    fn test_error_clears_on_external_set_query() {
        let mut f = fixture();
        press_enter(&mut f.search);
        f.search.set_query("Cat");
        assert!(!f.search.has_empty_search_error());
    }

    #[test]
    fn test_selection_bypasses_fetch_pipeline() {
        let mut f = fixture();
        type_str(&mut f.search, "do");
        fire_debounce(&mut f.search);
        settle_ok(&mut f.search, "do", &["Dog", "Dogs", "Doge"]);

        // Put another fetch in flight so loading is true at selection time
        type_str(&mut f.search, "g");
        fire_debounce(&mut f.search);
        assert!(f.search.is_loading());

        f.search.choose(0);

        assert_eq!(f.reporter.changes().last().map(String::as_str), Some("Dog"));
        assert_eq!(f.reporter.commits(), ["Dog"]);
        assert!(f.search.suggestions().is_empty());
        assert_eq!(f.search.query(), "Dog");
    }

    #[test]
    fn test_disabled_still_mirrors_but_never_fetches() {
        let mut f = fixture();
        f.search.set_disabled(true);
        type_str(&mut f.search, "dog");

        assert_eq!(f.reporter.changes(), ["d", "do", "dog"]);
        assert!(f.timer_rx.try_recv().is_err());
        assert!(f.lookup_rx.try_recv().is_err());
    }

    #[test]
    fn test_disabled_never_commits() {
        let mut f = fixture();
        type_str(&mut f.search, "do");
        fire_debounce(&mut f.search);
        settle_ok(&mut f.search, "do", &["Dog"]);

        f.search.set_disabled(true);
        press_enter(&mut f.search);
        f.search.choose(0);

        assert!(f.reporter.commits().is_empty());
        // The inert selection left the list alone
        assert_eq!(f.search.suggestions().len(), 1);
    }

    #[test]
    fn test_startup_commits_prefilled_query_trimmed() {
        let mut f = raw_fixture();
        f.search.set_query(" Cat ");
        f.search.on_timer(TimerFired {
            slot: TimerSlot::Startup,
        });

        assert_eq!(f.reporter.commits(), ["Cat"]);
        assert!(f.search.is_focused());
    }

    #[test]
    fn test_startup_with_blank_query_only_focuses() {
        let mut f = raw_fixture();
        assert!(!f.search.is_focused());
        f.search.on_timer(TimerFired {
            slot: TimerSlot::Startup,
        });
        assert!(f.reporter.commits().is_empty());
        assert!(f.search.is_focused());
    }

    #[test]
    fn test_fetch_failure_degrades_to_empty() {
        let mut f = fixture();
        type_str(&mut f.search, "dog");
        fire_debounce(&mut f.search);
        assert!(f.search.is_loading());

        settle_err(&mut f.search, "dog");

        assert!(f.search.suggestions().is_empty());
        assert!(!f.search.is_loading());
    }

    #[test]
    fn test_fetch_success_replaces_list_wholesale() {
        let mut f = fixture();
        type_str(&mut f.search, "dog");
        fire_debounce(&mut f.search);
        settle_ok(&mut f.search, "dog", &["Dog", "Dogs", "Doge"]);

        assert_eq!(f.search.suggestions(), ["Dog", "Dogs", "Doge"]);
        assert!(!f.search.is_loading());

        settle_ok(&mut f.search, "cat", &["Cat"]);
        assert_eq!(f.search.suggestions(), ["Cat"]);
    }

    #[test]
    fn test_stale_settle_overwrites_newer_state() {
        let mut f = fixture();
        type_str(&mut f.search, "do");
        fire_debounce(&mut f.search);

        // A newer fetch is pending while the old one is still in flight
        type_str(&mut f.search, "g");

        // The stale reply lands anyway: no generation guard
        settle_ok(&mut f.search, "do", &["Dolphin"]);
        assert_eq!(f.search.suggestions(), ["Dolphin"]);
        assert!(!f.search.is_loading());
    }

    #[test]
    fn test_commit_passes_untrimmed_value() {
        let mut f = fixture();
        type_str(&mut f.search, " dog ");
        press_enter(&mut f.search);

        assert_eq!(f.reporter.commits(), [" dog "]);
        assert!(f.search.suggestions().is_empty());
        assert!(!f.search.has_empty_search_error());
    }

    #[test]
    fn test_set_query_is_silent() {
        let mut f = fixture();
        f.search.set_query("abc");

        assert!(f.reporter.changes().is_empty());
        assert!(f.reporter.commits().is_empty());
        assert!(f.timer_rx.try_recv().is_err());
    }

    #[test]
    fn test_enter_requires_focus() {
        let mut f = raw_fixture();
        f.search.set_query("dog");
        press_enter(&mut f.search);
        assert!(f.reporter.commits().is_empty());
    }

    #[test]
    fn test_mouse_selects_suggestion_row() {
        let mut f = fixture();
        type_str(&mut f.search, "do");
        fire_debounce(&mut f.search);
        settle_ok(&mut f.search, "do", &["Dog", "Dogs"]);

        f.search.handle_input(&InputEvent::MouseDown(MouseEvent {
            x: 3,
            y: 2, // second suggestion row
            button: MouseButton::Left,
            modifiers: KeyModifiers::NONE,
        }));

        assert_eq!(f.reporter.commits(), ["Dogs"]);
        assert!(f.search.suggestions().is_empty());
    }

    #[test]
    fn test_mouse_on_button_submits() {
        let mut f = fixture();
        type_str(&mut f.search, "dog");

        let button = f.search.button_rect();
        f.search.handle_input(&InputEvent::MouseDown(MouseEvent {
            x: button.x + 1,
            y: button.y,
            button: MouseButton::Left,
            modifiers: KeyModifiers::NONE,
        }));

        assert_eq!(f.reporter.commits(), ["dog"]);
    }

    #[test]
    fn test_render_suggestion_rows_and_styling() {
        let mut f = fixture();
        type_str(&mut f.search, "do");
        fire_debounce(&mut f.search);
        settle_ok(&mut f.search, "do", &["Dog", "Dogs"]);
        assert!(f.search.autocomplete_active());

        let mut buffer = Buffer::new(60, 8);
        f.search.render(&mut buffer);

        assert_eq!(buffer.get(1, 1).map(Cell::ch), Some('D'));
        assert_eq!(buffer.get(3, 1).map(Cell::ch), Some('g'));
        assert_eq!(
            buffer.get(0, 1).map(Cell::bg),
            Some(f.search.config.suggestion_bg)
        );
        assert_eq!(buffer.get(1, 2).map(Cell::ch), Some('D'));
        // Row past the list is untouched background
        assert_eq!(buffer.get(0, 3).map(Cell::bg), Some(Rgb::DEFAULT_BG));
    }

    #[test]
    fn test_render_error_message_row() {
        let mut f = fixture();
        press_enter(&mut f.search);

        let mut buffer = Buffer::new(60, 8);
        f.search.render(&mut buffer);

        assert_eq!(buffer.get(0, 1).map(Cell::ch), Some('E'));
        assert_eq!(buffer.get(0, 1).map(Cell::fg), Some(f.search.config.error_fg));
    }

    #[test]
    fn test_render_spinner_only_while_loading() {
        let mut f = fixture();
        type_str(&mut f.search, "dog");
        fire_debounce(&mut f.search);

        let spinner_x = f.search.spinner_x();
        let mut buffer = Buffer::new(60, 8);
        f.search.render(&mut buffer);
        assert_ne!(buffer.get(spinner_x, 0).map(Cell::ch), Some(' '));

        settle_ok(&mut f.search, "dog", &[]);
        let mut buffer = Buffer::new(60, 8);
        f.search.render(&mut buffer);
        assert_eq!(buffer.get(spinner_x, 0).map(Cell::ch), Some(' '));
    }
}
