//! Stats bar component summarising review progress.

use crate::review::ReviewStats;

/// Component for displaying aggregate review counts on one line.
#[derive(Debug, Clone, Default)]
pub struct StatsBarComponent;

impl StatsBarComponent {
    /// Creates a new stats bar component.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the stats bar as a single line.
    #[must_use]
    pub fn view(stats: &ReviewStats) -> String {
        format!(
            "Total: {}  Reviewed: {}  Kept: {}  Unfollow: {}  Pending: {}",
            stats.total, stats.reviewed, stats.kept, stats.unfollow_requested, stats.pending
        )
    }
}
