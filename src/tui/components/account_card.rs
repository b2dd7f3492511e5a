//! Account card component presenting the account under review.
//!
//! The card shows one account at a time: display name, handle, bio, the
//! follows-you marker, and the position within the stored list.

use crate::model::AccountRecord;

use super::text::{first_line, truncate_to_width};

/// Fallback width when the terminal size is unknown.
const DEFAULT_CARD_WIDTH: usize = 78;

/// Placeholder shown when an account has no bio.
const NO_BIO_PLACEHOLDER: &str = "No bio available";

/// Context for rendering the account card.
#[derive(Debug, Clone)]
pub struct AccountCardViewContext<'a> {
    /// The account under review.
    pub record: &'a AccountRecord,
    /// One-based position of this account in the stored list.
    pub position: usize,
    /// Total number of stored accounts.
    pub total: usize,
    /// Maximum card width in terminal columns.
    pub max_width: usize,
}

/// Component for displaying the account under review.
#[derive(Debug, Clone, Default)]
pub struct AccountCardComponent;

impl AccountCardComponent {
    /// Creates a new account card component.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the account card as a string.
    #[must_use]
    pub fn view(ctx: &AccountCardViewContext<'_>) -> String {
        let width = if ctx.max_width == 0 {
            DEFAULT_CARD_WIDTH
        } else {
            ctx.max_width
        };

        let mut output = String::new();

        output.push_str(&format!("Account {} of {}\n\n", ctx.position, ctx.total));

        let identity = format!("{} ({})", ctx.record.name, ctx.record.handle);
        output.push_str(&truncate_to_width(&identity, width));
        output.push('\n');

        if ctx.record.follows_you == Some(true) {
            output.push_str("Follows you\n");
        }

        let bio = ctx
            .record
            .bio
            .as_deref()
            .map_or(NO_BIO_PLACEHOLDER, first_line);
        let bio_text = if bio.is_empty() { NO_BIO_PLACEHOLDER } else { bio };
        output.push_str(&truncate_to_width(bio_text, width));
        output.push('\n');

        output
    }
}
