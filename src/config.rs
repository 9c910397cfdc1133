/// Configuration for game construction.
///
/// # Examples
///
/// ```
/// use spectroscopy_rs::config::GameConfig;
///
/// assert_eq!(GameConfig::default().partition_limit, Some(24));
///
/// let config = GameConfig::default().with_table_bits(10).with_partition_limit(12);
/// assert_eq!(config.partition_limit, Some(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// The position table has `2^table_bits` buckets.
    pub table_bits: usize,
    /// Refuse to enumerate two-set partitions of larger candidate sets.
    ///
    /// `None` still caps the size at 63, the width of the subset mask.
    pub partition_limit: Option<usize>,
    /// Log a warning when partitioning a candidate set at least this large.
    pub partition_warning: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            table_bits: 12,
            partition_limit: Some(24),
            partition_warning: 16,
        }
    }
}

impl GameConfig {
    pub fn with_table_bits(mut self, bits: usize) -> Self {
        self.table_bits = bits;
        self
    }

    pub fn with_partition_limit(mut self, limit: usize) -> Self {
        self.partition_limit = Some(limit);
        self
    }

    pub fn with_partition_warning(mut self, size: usize) -> Self {
        self.partition_warning = size;
        self
    }
}
