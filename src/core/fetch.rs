//! List state with an explicit staleness guard.
//!
//! Two overlapping fetches (say, an initial load racing a post-mutation
//! refresh) must not let the slower, older response overwrite the newer one.
//! Every fetch takes a ticket; only the newest ticket may install a result.

use crate::api::models::ListResult;

/// Monotonic ticket dispenser. Tickets start at 1.
#[derive(Debug, Default)]
pub struct FetchGuard {
    next: u64,
    newest_seen: u64,
}

impl FetchGuard {
    pub fn begin(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    /// Accepts the ticket if no newer one has finished yet.
    pub fn accept(&mut self, ticket: u64) -> bool {
        if ticket < self.newest_seen {
            return false;
        }
        self.newest_seen = ticket;
        true
    }
}

/// Holds one list view's contents. Results replace the state wholesale;
/// there is no incremental merge.
#[derive(Debug)]
pub struct ListState<T> {
    guard: FetchGuard,
    pub items: Vec<T>,
    pub total: u64,
    pub loading: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListState<T> {
    pub fn new() -> Self {
        Self {
            guard: FetchGuard::default(),
            items: Vec::new(),
            total: 0,
            loading: false,
        }
    }

    /// Mark a fetch in flight and get its ticket.
    pub fn begin_fetch(&mut self) -> u64 {
        self.loading = true;
        self.guard.begin()
    }

    /// Install a result if its ticket is still current. Returns whether the
    /// state changed; a stale result is dropped silently.
    pub fn apply(&mut self, ticket: u64, result: ListResult<T>) -> bool {
        if !self.guard.accept(ticket) {
            return false;
        }
        self.items = result.items;
        self.total = result.total;
        self.loading = false;
        true
    }

    /// A failed fetch keeps the previous contents but still consumes the
    /// ticket, so an even older in-flight response cannot sneak in after it.
    pub fn fail(&mut self, ticket: u64) {
        if self.guard.accept(ticket) {
            self.loading = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(ids: &[u32], total: u64) -> ListResult<u32> {
        ListResult {
            items: ids.to_vec(),
            total,
        }
    }

    #[test]
    fn test_tickets_are_monotonic() {
        let mut guard = FetchGuard::default();
        let first = guard.begin();
        let second = guard.begin();
        assert!(second > first);
    }

    #[test]
    fn test_newer_result_wins_over_slow_older_fetch() {
        let mut state = ListState::new();
        let slow_initial = state.begin_fetch();
        let refresh = state.begin_fetch();

        assert!(state.apply(refresh, result(&[10, 11], 2)));
        // The slow initial load finishes afterwards and must be discarded
        assert!(!state.apply(slow_initial, result(&[1], 1)));

        assert_eq!(state.items, vec![10, 11]);
        assert_eq!(state.total, 2);
    }

    #[test]
    fn test_in_order_results_apply() {
        let mut state = ListState::new();
        let first = state.begin_fetch();
        assert!(state.apply(first, result(&[1, 2, 3], 30)));
        assert!(!state.loading);

        let second = state.begin_fetch();
        assert!(state.loading);
        assert!(state.apply(second, result(&[4], 1)));
        assert_eq!(state.items, vec![4]);
    }

    #[test]
    fn test_failure_keeps_previous_contents() {
        let mut state = ListState::new();
        let first = state.begin_fetch();
        state.apply(first, result(&[1, 2], 2));

        let second = state.begin_fetch();
        state.fail(second);
        assert!(!state.loading);
        assert_eq!(state.items, vec![1, 2]);

        // The failed ticket still blocks older stragglers
        assert!(!state.apply(first, result(&[9], 1)));
    }
}
