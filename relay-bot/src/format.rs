//! Reply formatter: renders stored records and bot notices as MarkdownV2 text, and splits long
//! replies into transport-sized units.
//!
//! Everything here is pure; sending (and the pauses between sends) lives in [`crate::reply`].

use chrono::{DateTime, Utc};
use storage::MessageRecord;
use teloxide::utils::markdown::{bold, code_block, escape};

/// Longest text sent as one outbound unit.
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Records per `/all` page.
pub const PAGE_SIZE: usize = 10;

/// Command reference shown by `/start` and `/help`.
const COMMAND_SUMMARY: &[(&str, &str)] = &[
    ("/start", "start working with the bot"),
    ("/help", "show this reference"),
    ("/get [N]", "show the last N messages (default 5)"),
    ("/all", "show every saved message"),
    ("/count", "show how many messages are saved"),
    ("/delete [ID]", "delete a message by ID"),
    ("/clear", "delete all messages (asks for confirmation)"),
];

/// `dd.mm.YYYY HH:MM` in UTC.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%d.%m.%Y %H:%M").to_string()
}

/// One record: ordinal, id and timestamp on a header line, then the text in a fixed-width block.
pub fn render_entry(ordinal: usize, record: &MessageRecord) -> String {
    format!(
        "{} {} {}\n{}\n\n",
        bold(&escape(&format!("{}.", ordinal))),
        escape(&format!("[ID: {}]", record.id)),
        escape(&format_timestamp(&record.created_at)),
        code_block(&record.text)
    )
}

/// Reply for `/get`: the records in the order given, numbered from 1.
pub fn render_recent(records: &[MessageRecord]) -> String {
    let mut out = format!(
        "📜 {}\n\n",
        bold(&escape(&format!("Last {} messages:", records.len())))
    );
    for (i, record) in records.iter().enumerate() {
        out.push_str(&render_entry(i + 1, record));
    }
    out
}

/// Splits records into pages of `page_size` (the last one may be shorter).
pub fn paginate(records: &[MessageRecord], page_size: usize) -> Vec<&[MessageRecord]> {
    records.chunks(page_size.max(1)).collect()
}

/// One `/all` page. Ordinals continue across pages, so `page_index` (0-based) and `page_size`
/// place the first entry.
pub fn render_page(
    page: &[MessageRecord],
    page_index: usize,
    total_pages: usize,
    page_size: usize,
) -> String {
    let mut out = format!(
        "📚 {}\n\n",
        bold(&escape(&format!(
            "All messages (page {}/{}):",
            page_index + 1,
            total_pages
        )))
    );
    let first_ordinal = page_index * page_size + 1;
    for (i, record) in page.iter().enumerate() {
        out.push_str(&render_entry(first_ordinal + i, record));
    }
    out
}

/// Splits `text` into units of at most `max_len` characters.
///
/// Each cut goes at the last line break within the first `max_len` characters of what remains
/// (the break starts the next unit); with no usable break the cut is exactly at `max_len`. The
/// remainder is always the last unit, and concatenating the units gives back `text`.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut parts = Vec::new();
    let mut rest = text;

    while let Some((limit, _)) = rest.char_indices().nth(max_len) {
        // a break at 0 would yield an empty unit and no progress
        let cut = match rest[..limit].rfind('\n') {
            Some(i) if i > 0 => i,
            _ => limit,
        };
        parts.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    parts.push(rest.to_string());
    parts
}

const FENCE: &str = "```";

/// Byte index of the next cut in `rest` under the [`split_message`] rule, or `rest.len()` when
/// it fits.
fn next_cut(rest: &str, max_len: usize) -> usize {
    match rest.char_indices().nth(max_len) {
        Some((limit, _)) => match rest[..limit].rfind('\n') {
            Some(i) if i > 0 => i,
            _ => limit,
        },
        None => rest.len(),
    }
}

/// True when `chunk` ends in a backslash that still waits for the character it escapes.
fn ends_with_open_escape(chunk: &str) -> bool {
    chunk.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Splits rendered MarkdownV2 into units of at most `max_len` characters that each parse on their
/// own.
///
/// Cuts follow [`split_message`]. A cut never separates `\` from the character it escapes, and a
/// code block spanning a cut is closed at the end of one unit and reopened at the start of the next.
pub fn split_markdown(text: &str, max_len: usize) -> Vec<String> {
    let closing = format!("\n{}", FENCE);
    // room for a reopened and a closing fence
    let budget = max_len.saturating_sub(2 * closing.len()).max(2);
    let toggles = |chunk: &str| chunk.matches(FENCE).count() % 2 == 1;
    let mut units = Vec::new();
    let mut rest = text;
    let mut in_code = false;

    loop {
        let mut cut = next_cut(rest, budget);
        if cut < rest.len() && ends_with_open_escape(&rest[..cut]) {
            cut -= 1;
            if cut == 0 {
                cut = rest.char_indices().nth(2).map_or(rest.len(), |(i, _)| i);
            }
        }
        // an opening fence right at the cut moves to the next unit
        if cut < rest.len()
            && !in_code
            && toggles(&rest[..cut])
            && rest[..cut].ends_with(FENCE)
            && cut > FENCE.len()
        {
            cut -= FENCE.len();
        }
        let chunk = &rest[..cut];
        rest = &rest[cut..];

        let mut unit = String::with_capacity(chunk.len() + 2 * closing.len());
        if in_code {
            unit.push_str(FENCE);
            if !chunk.starts_with('\n') {
                unit.push('\n');
            }
        }
        unit.push_str(chunk);
        if toggles(chunk) {
            in_code = !in_code;
        }
        if in_code && !rest.is_empty() {
            unit.push_str(&closing);
            // the block's own closing fence is consumed instead of reopened empty
            if let Some(after) = rest.strip_prefix(closing.as_str()) {
                rest = after;
                in_code = false;
            }
        }
        units.push(unit);

        if rest.is_empty() {
            return units;
        }
    }
}

/// Plain rendering of MarkdownV2 source: escapes resolved, emphasis markers and code fences
/// dropped. Sent when the transport rejects the formatted version.
pub fn strip_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '`' => {
                let mut run = 1;
                while chars.next_if_eq(&'`').is_some() {
                    run += 1;
                }
                if run == 3 && chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '*' | '_' | '~' | '|' => {}
            other => out.push(other),
        }
    }
    out
}

pub fn start_text(first_name: &str) -> String {
    format!(
        "👋 {}\n\n{}\n\n📋 {}\n{}\n\n{}",
        escape(&format!("Hello, {}!", first_name)),
        escape("I save your text messages and give them back on request."),
        bold("Commands:"),
        command_list(),
        escape("Just send me any text and I will save it.")
    )
}

pub fn help_text() -> String {
    format!(
        "📋 {}\n{}\n\n💡 {}\n{}",
        bold("Commands:"),
        command_list(),
        bold(&escape("How to use:")),
        escape(
            "1. Send any text - it gets saved\n\
             2. Use /get or /all to read it back\n\
             3. Use /delete or /clear to remove it"
        )
    )
}

fn command_list() -> String {
    COMMAND_SUMMARY
        .iter()
        .map(|(command, description)| escape(&format!("• {} - {}", command, description)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn saved_ack(text: &str) -> String {
    format!(
        "✅ {}\n\n📝 {}",
        escape("Message saved!"),
        escape(&format!("Your text: {}", text))
    )
}

pub fn count_text(count: i64) -> String {
    format!(
        "📊 {}\n\n✅ {} {}",
        bold("Statistics:"),
        escape("Saved messages:"),
        bold(&count.to_string())
    )
}

pub fn deleted_text(message_id: i64) -> String {
    format!(
        "✅ {}",
        escape(&format!("Message with ID {} deleted", message_id))
    )
}

pub fn delete_usage_text() -> String {
    format!(
        "❌ {}",
        escape("Specify the ID of the message to delete\nExample: /delete 42")
    )
}

pub fn invalid_id_text() -> String {
    format!("❌ {}", escape("Invalid ID format"))
}

pub fn empty_text() -> String {
    format!("📭 {}", escape("No messages yet"))
}

pub fn unknown_command_text() -> String {
    format!(
        "🤔 {}",
        escape("Unknown command. Use /help for the list of commands")
    )
}

pub fn clear_prompt_text() -> String {
    format!(
        "⚠️ {}\n\n{}",
        bold(&escape("Warning!")),
        escape("Do you really want to delete ALL messages?\nThis cannot be undone.")
    )
}

pub fn cleared_text() -> String {
    format!("✅ {}", escape("All messages deleted"))
}

pub fn clear_cancelled_text() -> String {
    format!("❌ {}", escape("Deletion cancelled"))
}

/// Short failure notice for a storage error while `action` (e.g. "saving the message").
pub fn failure_text(action: &str) -> String {
    format!("❌ {}", escape(&format!("Error {}", action)))
}
