//! CSV export of the review ledger.
//!
//! Produces a spreadsheet-friendly document with one row per stored
//! account. Fields containing commas, quotes, or newlines are quoted and
//! internal quotes doubled per RFC 4180.

use std::io::Write;

use crate::model::{AccountRecord, SourceHost};

use super::model::{ExportError, ExportedAccount};

/// Column headers, in output order.
const CSV_HEADERS: [&str; 6] = [
    "Handle",
    "Name",
    "Follows You",
    "Status",
    "Profile URL",
    "Decided At",
];

/// Writes the review ledger as CSV.
///
/// Accounts appear in the order given, one row each, after a header row.
/// An empty slice yields a header-only document.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if serialising a record or flushing the
/// underlying writer fails.
pub fn write_csv<W: Write>(
    writer: &mut W,
    accounts: &[AccountRecord],
    host: &SourceHost,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(CSV_HEADERS).map_err(csv_error)?;

    for record in accounts {
        let row = ExportedAccount::from_record(record, host);
        csv_writer
            .write_record([
                row.handle.as_str(),
                row.name.as_str(),
                row.follows_you,
                row.status,
                row.profile_url.as_str(),
                row.decided_at.as_str(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer.flush().map_err(flush_error)?;

    Ok(())
}

fn csv_error(source: csv::Error) -> ExportError {
    ExportError::Io {
        message: format!("failed to write CSV record: {source}"),
    }
}

fn flush_error(source: std::io::Error) -> ExportError {
    ExportError::Io {
        message: format!("failed to flush CSV output: {source}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use crate::model::{Handle, ReviewStatus, ScrapedAccount};

    use super::*;

    fn host() -> SourceHost {
        SourceHost::new("x.com").expect("fixture host should be valid")
    }

    fn record(handle: &str, name: &str) -> AccountRecord {
        let scraped = ScrapedAccount {
            handle: Handle::new(handle).expect("fixture handle should be valid"),
            name: Some(name.to_owned()),
            avatar: None,
            bio: None,
            follows_you: None,
        };
        let scanned_at = Utc
            .with_ymd_and_hms(2026, 5, 1, 9, 0, 0)
            .single()
            .expect("fixture timestamp should be valid");
        AccountRecord::from_scraped(scraped, scanned_at)
    }

    fn render(accounts: &[AccountRecord]) -> Result<String, Box<dyn std::error::Error>> {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, accounts, &host())?;
        Ok(String::from_utf8(buffer)?)
    }

    #[rstest]
    fn empty_store_yields_header_only() -> Result<(), Box<dyn std::error::Error>> {
        let output = render(&[])?;

        assert_eq!(
            output,
            "Handle,Name,Follows You,Status,Profile URL,Decided At\n"
        );
        Ok(())
    }

    #[rstest]
    fn rows_follow_stored_order() -> Result<(), Box<dyn std::error::Error>> {
        let mut kept = record("alice", "Alice");
        kept.status = ReviewStatus::Kept;
        kept.follows_you = Some(true);
        kept.decided_at = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).single();
        let pending = record("bob", "Bob");

        let output = render(&[kept, pending])?;
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("Handle,Name,Follows You,Status,Profile URL,Decided At")
        );
        assert_eq!(
            lines.next(),
            Some("alice,Alice,yes,kept,https://x.com/alice,2026-05-01T12:00:00.000Z")
        );
        assert_eq!(
            lines.next(),
            Some("bob,Bob,,pending,https://x.com/bob,")
        );
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[rstest]
    fn quoted_name_doubles_internal_quotes() -> Result<(), Box<dyn std::error::Error>> {
        let builder = record("bob", "Bob \"The Builder\" Smith");

        let output = render(&[builder])?;

        assert!(
            output.contains("\"Bob \"\"The Builder\"\" Smith\""),
            "expected doubled quotes in: {output}"
        );
        Ok(())
    }

    #[rstest]
    fn comma_in_name_is_quoted() -> Result<(), Box<dyn std::error::Error>> {
        let listed = record("carol", "Carol, PhD");

        let output = render(&[listed])?;

        assert!(
            output.contains("\"Carol, PhD\""),
            "expected quoted field in: {output}"
        );
        Ok(())
    }
}
