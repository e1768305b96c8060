//! Store configuration.

/// Configuration for constructing a [`TransactionalStore`](crate::TransactionalStore).
///
/// None of these options change read or write semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Number of entries to reserve in the committed map up front.
    pub initial_capacity: usize,

    /// Number of entries to reserve in each new transaction overlay.
    pub overlay_capacity: usize,

    /// Label attached to tracing events emitted by the store.
    pub name: Option<String>,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the committed map's initial capacity.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the capacity reserved for each transaction overlay.
    #[must_use]
    pub const fn overlay_capacity(mut self, capacity: usize) -> Self {
        self.overlay_capacity = capacity;
        self
    }

    /// Sets the store label used in log output.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the label used in log output.
    pub(crate) fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("txkv")
    }
}
