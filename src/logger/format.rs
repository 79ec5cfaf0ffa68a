//! Log formatting and output with ANSI colors and text wrapping
//!
//! Handles:
//! - Colorized console output with tag and level formatting
//! - Text wrapping at word boundaries
//! - Dual output (console + file)
//! - Console shutdown on a broken pipe (the file mirror keeps going)

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{self, stdout, ErrorKind, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LOG_TYPE_WIDTH: usize = 8;

/// Maximum console line length before wrapping
const MAX_LINE_LENGTH: usize = 145;

/// Set once stdout's reader is gone; later lines go to the file only
static CONSOLE_CLOSED: AtomicBool = AtomicBool::new(false);

/// Format and output a log message
pub fn format_and_log(tag: &LogTag, level: LogLevel, message: &str, colors: bool) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let (prefix, tag_str, level_str) = if colors {
        (
            time.dimmed().to_string(),
            format_tag(tag).to_string(),
            format_log_type(level).to_string(),
        )
    } else {
        (
            time.clone(),
            format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH),
            format!("{:<width$}", level.as_str(), width = LOG_TYPE_WIDTH),
        )
    };

    let base_line = format!("{} [{}] [{}] ", prefix, tag_str, level_str);
    let base_length = strip_ansi_codes(&base_line).chars().count();
    let available_space = if MAX_LINE_LENGTH > base_length + 20 {
        MAX_LINE_LENGTH - base_length
    } else {
        50
    };

    let message_chunks = wrap_text(message, available_space);
    let continuation_prefix = " ".repeat(base_length);

    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let tag_clean = tag.to_plain_string();

    for (i, chunk) in message_chunks.iter().enumerate() {
        if i == 0 {
            print_stdout_safe(&format!("{}{}", base_line, chunk));
        } else {
            print_stdout_safe(&format!("{}{}", continuation_prefix, chunk));
        }
    }

    // The file keeps the message unwrapped so it stays grep-friendly
    write_to_file(&file_line(&timestamp, &tag_clean, level, message));
}

/// Plain line written to the log file
pub(crate) fn file_line(timestamp: &str, tag: &str, level: LogLevel, message: &str) -> String {
    format!("{} [{}] [{}] {}", timestamp, tag, level.as_str(), message)
}

/// Format a tag with appropriate color
fn format_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Api => label.bright_purple().bold(),
        LogTag::Homework => label.bright_green().bold(),
        LogTag::Telegram => label.bright_cyan().bold(),
        LogTag::Poller => label.bright_blue().bold(),
        LogTag::External(_) => label.white().bold(),
    }
}

/// Format log level with appropriate color
fn format_log_type(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LOG_TYPE_WIDTH);
    match level {
        LogLevel::Critical => label.white().on_red().bold(),
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Debug | LogLevel::Verbose => label.dimmed(),
        LogLevel::Info => label.white().bold(),
    }
}

/// Print to stdout; write errors never end the process
fn print_stdout_safe(message: &str) {
    if CONSOLE_CLOSED.load(Ordering::Relaxed) {
        return;
    }
    if let Err(e) = write_console(&mut stdout().lock(), message) {
        if closes_console(&e) {
            CONSOLE_CLOSED.store(true, Ordering::Relaxed);
        } else {
            let _ = writeln!(io::stderr(), "Logger stdout error: {}", e);
        }
    }
}

fn write_console<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message)?;
    out.flush()
}

/// A broken pipe means nobody reads the console any more
fn closes_console(error: &io::Error) -> bool {
    error.kind() == ErrorKind::BrokenPipe
}

/// Remove ANSI color codes from text
fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::new();
    let mut in_escape = false;

    for ch in text.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape && ch == 'm' {
            in_escape = false;
        } else if !in_escape {
            result.push(ch);
        }
    }
    result
}

/// Wrap text at word boundaries, respecting existing newlines
///
/// Widths are counted in chars, so Cyrillic messages wrap at the same
/// visual width as ASCII ones.
pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for line in text.split('\n') {
        if line.chars().count() <= max_width {
            result.push(line.to_string());
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current_line.chars().count();

            if word_len > max_width {
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                result.extend(break_long_word(word, max_width));
            } else if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_len + word_len + 1 <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                result.push(std::mem::replace(&mut current_line, word.to_string()));
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}

/// Break a very long word (URLs, JSON blobs) into fixed-width chunks
fn break_long_word(word: &str, max_width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}
