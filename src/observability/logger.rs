//! Minimal structured JSON logger.
//!
//! Emits one JSON object per line with a stable field layout: the event
//! name first, then severity, then alphabetically ordered context fields.
//! Line-oriented output keeps logs greppable and machine-parseable without
//! pulling a logging framework into the hot path.

use std::fmt;
use std::io::Write;

/// Log severity, ordered from chattiest to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Trace,
    Info,
    Error,
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Info => "info",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stateless logger facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Logger {
    /// Logs an event with context fields to stdout.
    pub fn log(event: &str, severity: Severity, fields: &[(&str, String)]) {
        let line = Self::format(event, severity, fields);
        println!("{line}");
    }

    /// Logs an event to stderr, for failures that must not be lost when
    /// stdout is redirected.
    pub fn log_stderr(event: &str, severity: Severity, fields: &[(&str, String)]) {
        eprintln!("{}", Self::format(event, severity, fields));
    }

    /// Writes a log line to an arbitrary sink; used by tests.
    pub fn log_to_writer<W: Write>(
        writer: &mut W,
        event: &str,
        severity: Severity,
        fields: &[(&str, String)],
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", Self::format(event, severity, fields))
    }

    fn format(event: &str, severity: Severity, fields: &[(&str, String)]) -> String {
        let mut sorted: Vec<&(&str, String)> = fields.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);

        let mut line = String::with_capacity(64);
        line.push_str("{\"event\":\"");
        line.push_str(&escape_json_string(event));
        line.push_str("\",\"severity\":\"");
        line.push_str(severity.as_str());
        line.push('"');
        for (name, value) in sorted {
            line.push_str(",\"");
            line.push_str(&escape_json_string(name));
            line.push_str("\":\"");
            line.push_str(&escape_json_string(value));
            line.push('"');
        }
        line.push('}');
        line
    }
}

fn escape_json_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}
