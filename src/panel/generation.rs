/// Ticket handed out when a list load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Loaded list plus the generation that may still overwrite it. Starting a
/// load or mutating the list moves the generation forward, so a load that
/// resolves after either is dropped.
#[derive(Debug)]
pub struct ListState<T> {
    items: Vec<T>,
    current: u64,
    loading: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: 0,
            loading: false,
        }
    }
}

impl<T> ListState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn begin_load(&mut self) -> Generation {
        self.current += 1;
        self.loading = true;
        Generation(self.current)
    }

    /// Applies `items` if `ticket` is still the latest generation.
    pub fn finish_load(&mut self, ticket: Generation, items: Vec<T>) -> bool {
        if ticket.0 != self.current {
            return false;
        }
        self.items = items;
        self.loading = false;
        true
    }

    pub fn fail_load(&mut self, ticket: Generation) {
        if ticket.0 == self.current {
            self.loading = false;
        }
    }

    /// Local edit that supersedes any load in flight.
    pub fn mutate(&mut self, edit: impl FnOnce(&mut Vec<T>)) {
        self.current += 1;
        self.loading = false;
        edit(&mut self.items);
    }
}
