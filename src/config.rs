//! Sort options.

/// Partitions larger than this many keys take the radix step in the byte-key engine.
pub const RADIX_SORT_THRESHOLD: usize = 1024;

/// Direction in which the key sequence ends up sorted.
///
/// Both directions are stable: keys that compare equal keep their input order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

/// Runtime options for a group sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortOptions {
    /// Direction of the sorted key.
    pub order: Order,
    /// See [`RADIX_SORT_THRESHOLD`]. Only the byte-key engine reads this.
    pub radix_threshold: usize,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            order: Order::Ascending,
            radix_threshold: RADIX_SORT_THRESHOLD,
        }
    }
}

impl SortOptions {
    /// Sets the sort direction.
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Sets the partition size above which the byte-key engine takes a radix step.
    pub fn with_radix_threshold(mut self, radix_threshold: usize) -> Self {
        self.radix_threshold = radix_threshold;
        self
    }

    /// Default options with [`Order::Descending`].
    pub fn descending() -> Self {
        Self::default().with_order(Order::Descending)
    }
}
