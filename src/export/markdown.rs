//! Markdown checklist export for manual unfollowing.
//!
//! Renders the accounts marked for unfollowing as a Markdown checklist
//! using the `minijinja` template engine. Each entry links to the account
//! profile so the user can open it, confirm the decision, and unfollow by
//! hand.

use std::io::Write;

use chrono::{DateTime, Utc};
use minijinja::{Environment, context};

use crate::model::{AccountRecord, ReviewStatus, SourceHost};

use super::model::{ExportError, ExportedAccount};

/// Checklist document template.
///
/// Receives `generated_at` (ISO 8601 string), `host`, and `accounts`
/// (flattened rows for every unfollow-requested account).
const CHECKLIST_TEMPLATE: &str = "\
# FollowSweep unfollow checklist

Generated: {{ generated_at }}
Source: {{ host }}

{% if accounts -%}
{{ accounts | length }} account(s) marked for unfollowing. Open each
profile, confirm it is the right account, and unfollow it by hand. Tick
the box once done.

{% for account in accounts -%}
- [ ] [@{{ account.handle }}]({{ account.profile_url }}) {{ account.name }}
{% endfor -%}
{% else -%}
No accounts are marked for unfollowing.
{% endif -%}
";

/// Writes the unfollow checklist in Markdown format.
///
/// Only accounts with status `unfollow_requested` appear; an empty
/// selection still produces a complete document stating that nothing is
/// marked.
///
/// # Errors
///
/// Returns [`ExportError::Template`] if rendering fails and
/// [`ExportError::Io`] if writing the output fails.
pub fn write_markdown<W: Write>(
    writer: &mut W,
    accounts: &[AccountRecord],
    host: &SourceHost,
    generated_at: DateTime<Utc>,
) -> Result<(), ExportError> {
    let mut env = Environment::new();

    // The checklist is plain Markdown, not HTML.
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);

    env.add_template("checklist", CHECKLIST_TEMPLATE)
        .map_err(|e| ExportError::Template {
            message: format!("invalid checklist template: {e}"),
        })?;

    let rows: Vec<ExportedAccount> = accounts
        .iter()
        .filter(|record| record.status == ReviewStatus::UnfollowRequested)
        .map(|record| ExportedAccount::from_record(record, host))
        .collect();

    let ctx = context! {
        generated_at => generated_at.to_rfc3339(),
        host => host.as_str(),
        accounts => rows,
    };

    let template = env
        .get_template("checklist")
        .map_err(|e| ExportError::Template {
            message: format!("failed to retrieve checklist template: {e}"),
        })?;

    let output = template.render(ctx).map_err(|e| ExportError::Template {
        message: format!("checklist rendering failed: {e}"),
    })?;

    writer
        .write_all(output.as_bytes())
        .map_err(|e| ExportError::Io {
            message: format!("failed to write checklist output: {e}"),
        })?;

    Ok(())
}
