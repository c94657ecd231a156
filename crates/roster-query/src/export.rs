//! CSV encoding of user rows.
//!
//! Format:
//! ```text
//! id,name,username,email,city,company,website,phone
//! "1","Leanne Graham","Bret","Sincere@april.biz","Gwenborough","Romaguera-Crona","hildegard.org","1-770-736-8031 x56442"
//! ```
//! The header is written as-is. Every data field is quoted, interior quotes
//! are doubled, lines are joined with `\n` and there is no trailing newline.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use roster_core::{ExportError, UserRecord};

/// Header row. Column set and order are fixed.
pub const CSV_HEADER: &str = "id,name,username,email,city,company,website,phone";

/// MIME type handed to the file sink.
pub const CSV_MIME: &str = "text/csv";

/// Encode `users` as CSV text.
///
/// An empty slice encodes to the header alone; callers that must not
/// produce header-only files check for emptiness first.
pub fn encode_csv<'a, I>(users: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a UserRecord>,
{
    let mut buf = Vec::with_capacity(CSV_HEADER.len() + 1);
    buf.extend_from_slice(CSV_HEADER.as_bytes());
    buf.push(b'\n');

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buf);

    let mut rows = 0usize;
    for user in users {
        wtr.write_record(row_fields(user))
            .map_err(|e| ExportError::Csv(e.to_string()))?;
        rows += 1;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }

    tracing::debug!("Encoded {} rows as CSV ({} bytes)", rows, text.len());
    Ok(text)
}

fn row_fields(user: &UserRecord) -> [String; 8] {
    [
        user.id.to_string(),
        user.name.clone(),
        user.username.clone(),
        user.email.clone(),
        user.city().to_string(),
        user.company_name().to_string(),
        user.website.clone(),
        user.phone.clone(),
    ]
}
