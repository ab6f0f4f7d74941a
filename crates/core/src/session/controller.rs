//! Search session controller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::archive::{ArchiveError, ArchiveItem, MediaType, SearchRequest};
use crate::prefs::{self, keys, PreferenceStore};

use super::debounce::Debouncer;

/// Shown when a search is requested with both filters blank.
pub const VALIDATION_MESSAGE: &str = "Please enter a search term or creator name.";

/// Shown when a well-formed search returns zero records.
pub const NO_RESULTS_MESSAGE: &str = "No results found for your query.";

/// A search issued by the session. `seq` orders overlapping searches:
/// only the outcome of the highest issued sequence may be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub request: SearchRequest,
}

/// In-memory state for one interactive session.
///
/// All mutation goes through this controller. Filter edits and result
/// changes are mirrored into the preference store as they happen; the
/// store never blocks or fails the session.
pub struct SearchSession {
    query: String,
    creator: String,
    media_type: MediaType,
    results: Vec<ArchiveItem>,
    loading: bool,
    error: Option<String>,
    selected: Option<ArchiveItem>,
    completed: bool,
    seq: u64,
    debounce: Debouncer,
    store: Arc<dyn PreferenceStore>,
}

impl SearchSession {
    /// Restore filter state and the last result set from the store,
    /// falling back to defaults for anything absent or corrupt.
    pub fn restore(store: Arc<dyn PreferenceStore>, debounce_window: Duration) -> Self {
        let query = prefs::load_or(store.as_ref(), keys::QUERY, "");
        let creator = prefs::load_or(store.as_ref(), keys::CREATOR, "");
        let media_type = MediaType::parse(&prefs::load_or(
            store.as_ref(),
            keys::MEDIA_TYPE,
            MediaType::All.as_str(),
        ));
        let results: Vec<ArchiveItem> = prefs::load_json_or_default(store.as_ref(), keys::RESULTS);

        Self {
            query,
            creator,
            media_type,
            results,
            loading: false,
            error: None,
            selected: None,
            completed: false,
            seq: 0,
            debounce: Debouncer::new(debounce_window),
            store,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn results(&self) -> &[ArchiveItem] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&ArchiveItem> {
        self.selected.as_ref()
    }

    /// True once at least one search cycle has finished; lets the
    /// presentation tell "not searched yet" apart from "searched, empty".
    pub fn has_completed_search(&self) -> bool {
        self.completed
    }

    /// Whether restored state warrants the one-time startup search.
    pub fn wants_initial_search(&self) -> bool {
        !self.query.trim().is_empty() || !self.creator.trim().is_empty()
    }

    pub fn set_query(&mut self, text: String, now: Instant) {
        self.query = text;
        self.store.save(keys::QUERY, &self.query);
        self.debounce.schedule(now);
    }

    pub fn set_creator(&mut self, text: String, now: Instant) {
        self.creator = text;
        self.store.save(keys::CREATOR, &self.creator);
        self.debounce.schedule(now);
    }

    pub fn set_media_type(&mut self, media_type: MediaType, now: Instant) {
        self.media_type = media_type;
        self.store.save(keys::MEDIA_TYPE, media_type.as_str());
        self.debounce.schedule(now);
    }

    /// Explicit submit. Cancels any pending debounced trigger and returns
    /// the ticket to run, or `None` when the request was rejected up front.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        self.debounce.cancel();
        self.start_search()
    }

    /// When the next debounced trigger is due, if any.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Poll the debounce deadline; fires at most once per scheduled edit
    /// burst, behaving exactly like an explicit submit when it does.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<SearchTicket> {
        if self.debounce.fire(now) {
            self.start_search()
        } else {
            None
        }
    }

    fn start_search(&mut self) -> Option<SearchTicket> {
        let request = SearchRequest::new(self.query.clone(), self.creator.clone(), self.media_type);
        if !request.is_searchable() {
            self.error = Some(VALIDATION_MESSAGE.to_string());
            return None;
        }

        self.seq += 1;
        self.loading = true;
        self.error = None;
        // Stale results must never display alongside the loading indicator.
        self.results.clear();
        self.persist_results();

        Some(SearchTicket {
            seq: self.seq,
            request,
        })
    }

    /// Apply a finished search. Outcomes from superseded tickets are
    /// dropped so a slow earlier search can never overwrite a newer one.
    /// Returns whether the outcome was applied.
    pub fn apply_result(
        &mut self,
        seq: u64,
        outcome: Result<Vec<ArchiveItem>, ArchiveError>,
    ) -> bool {
        if seq != self.seq {
            debug!(seq, latest = self.seq, "discarding stale search result");
            return false;
        }

        self.loading = false;
        self.completed = true;

        match outcome {
            Ok(items) if items.is_empty() => {
                self.error = Some(NO_RESULTS_MESSAGE.to_string());
                self.results.clear();
            }
            Ok(items) => {
                self.error = None;
                self.results = items;
            }
            Err(e) => {
                warn!(error = %e, "search failed");
                self.error = Some(format!("Failed to fetch results: {}", e));
                self.results.clear();
            }
        }

        self.persist_results();
        true
    }

    /// Select a record from the current result set by identifier. The
    /// selection holds its own copy, so an open detail view stays valid
    /// even if the result set is replaced underneath it.
    pub fn select(&mut self, identifier: &str) -> bool {
        match self.results.iter().find(|item| item.identifier == identifier) {
            Some(item) => {
                self.selected = Some(item.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    fn persist_results(&self) {
        prefs::save_json(self.store.as_ref(), keys::RESULTS, &self.results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MemoryPreferenceStore};

    const WINDOW: Duration = Duration::from_millis(300);

    fn session() -> SearchSession {
        SearchSession::restore(Arc::new(MemoryPreferenceStore::new()), WINDOW)
    }

    #[test]
    fn test_blank_submit_sets_validation_error_without_ticket() {
        let mut session = session();
        let ticket = session.submit();

        assert!(ticket.is_none());
        assert_eq!(session.error(), Some(VALIDATION_MESSAGE));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_submit_clears_error_and_results() {
        let mut session = session();
        let now = Instant::now();
        session.set_query("cats".to_string(), now);
        let ticket = session.submit().unwrap();
        assert!(session.apply_result(ticket.seq, Ok(vec![fixtures::item("a", "A")])));

        session.set_query("dogs".to_string(), now);
        let ticket = session.submit().unwrap();

        assert!(session.is_loading());
        assert!(session.error().is_none());
        assert!(session.results().is_empty());
        assert_eq!(ticket.request.query, "dogs");
    }

    #[test]
    fn test_sequence_increments_per_ticket() {
        let mut session = session();
        session.set_query("cats".to_string(), Instant::now());

        let first = session.submit().unwrap();
        let second = session.submit().unwrap();
        assert_eq!(first.seq + 1, second.seq);
    }

    #[test]
    fn test_stale_outcome_discarded() {
        let mut session = session();
        session.set_query("cats".to_string(), Instant::now());

        let slow = session.submit().unwrap();
        let fast = session.submit().unwrap();

        assert!(session.apply_result(fast.seq, Ok(vec![fixtures::item("fresh", "Fresh")])));
        assert!(!session.apply_result(slow.seq, Ok(vec![fixtures::item("stale", "Stale")])));

        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].identifier, "fresh");
    }

    #[test]
    fn test_empty_outcome_is_informational_error() {
        let mut session = session();
        session.set_query("cats".to_string(), Instant::now());
        let ticket = session.submit().unwrap();

        session.apply_result(ticket.seq, Ok(vec![]));

        assert_eq!(session.error(), Some(NO_RESULTS_MESSAGE));
        assert!(session.results().is_empty());
        assert!(!session.is_loading());
        assert!(session.has_completed_search());
    }

    #[test]
    fn test_failure_outcome_carries_detail() {
        let mut session = session();
        session.set_query("cats".to_string(), Instant::now());
        let ticket = session.submit().unwrap();

        session.apply_result(ticket.seq, Err(ArchiveError::Status { status: 503 }));

        let message = session.error().unwrap();
        assert!(message.starts_with("Failed to fetch results:"));
        assert!(message.contains("503"));
    }

    #[test]
    fn test_debounced_trigger_matches_submit_behavior() {
        let mut session = session();
        let start = Instant::now();
        session.set_query("cats".to_string(), start);

        assert!(session.poll_debounce(start).is_none());
        let ticket = session.poll_debounce(start + WINDOW).unwrap();
        assert_eq!(ticket.request.query, "cats");

        // Fired once; nothing left pending.
        assert!(session.poll_debounce(start + WINDOW * 2).is_none());
    }

    #[test]
    fn test_rapid_edits_coalesce_into_one_trigger() {
        let mut session = session();
        let start = Instant::now();

        for (i, text) in ["m", "mo", "mob", "moby", "moby "].iter().enumerate() {
            session.set_query(text.to_string(), start + Duration::from_millis(i as u64 * 20));
        }

        let mut fired = 0;
        for ms in (0..1000).step_by(10) {
            if session.poll_debounce(start + Duration::from_millis(ms)).is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_submit_cancels_pending_debounce() {
        let mut session = session();
        let start = Instant::now();
        session.set_query("cats".to_string(), start);
        session.submit().unwrap();

        assert!(session.debounce_deadline().is_none());
        assert!(session.poll_debounce(start + WINDOW).is_none());
    }

    #[test]
    fn test_select_requires_present_identifier() {
        let mut session = session();
        session.set_query("cats".to_string(), Instant::now());
        let ticket = session.submit().unwrap();
        session.apply_result(ticket.seq, Ok(vec![fixtures::item("a", "A")]));

        assert!(!session.select("missing"));
        assert!(session.selected().is_none());

        assert!(session.select("a"));
        assert_eq!(session.selected().unwrap().identifier, "a");

        session.close_detail();
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_selection_survives_result_replacement() {
        let mut session = session();
        session.set_query("cats".to_string(), Instant::now());
        let ticket = session.submit().unwrap();
        session.apply_result(ticket.seq, Ok(vec![fixtures::item("a", "A")]));
        session.select("a");

        let ticket = session.submit().unwrap();
        session.apply_result(ticket.seq, Ok(vec![fixtures::item("b", "B")]));

        assert_eq!(session.selected().unwrap().identifier, "a");
    }
}
