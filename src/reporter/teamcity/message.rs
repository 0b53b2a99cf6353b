//! TeamCity service message line protocol
//!
//! `##teamcity[<name> <key>='<value>' ...]`, one message per line. Values are
//! escaped with the protocol's `|` table; every message of a run carries the
//! same `flowId`.

use crate::errors::{ConvertError, Result};

/// Escape a value for use inside `'...'`
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '|' => out.push_str("||"),
            '\'' => out.push_str("|'"),
            '\n' => out.push_str("|n"),
            '\r' => out.push_str("|r"),
            '[' => out.push_str("|["),
            ']' => out.push_str("|]"),
            '\u{0085}' => out.push_str("|x"),
            '\u{2028}' => out.push_str("|l"),
            '\u{2029}' => out.push_str("|p"),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape`]. Unknown escape sequences are kept verbatim.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '|' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('|') => out.push('|'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('[') => out.push('['),
            Some(']') => out.push(']'),
            Some('x') => out.push('\u{0085}'),
            Some('l') => out.push('\u{2028}'),
            Some('p') => out.push('\u{2029}'),
            Some(other) => {
                out.push('|');
                out.push(other);
            }
            None => out.push('|'),
        }
    }
    out
}

/// One service message under construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMessage {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
}

impl ServiceMessage {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    pub fn attr_opt(self, key: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Render as a single line, `flowId` last
    pub fn render(&self, flow_id: &str) -> String {
        let mut line = format!("##teamcity[{}", self.name);
        for (key, value) in &self.attrs {
            line.push_str(&format!(" {}='{}'", key, escape(value)));
        }
        line.push_str(&format!(" flowId='{}']", escape(flow_id)));
        line
    }
}

/// Stream state; suites must close in reverse order of opening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    NotStarted,
    SuiteOpen(usize),
    Finished,
}

/// Collects service messages for one conversion and enforces suite nesting
#[derive(Debug)]
pub struct Emitter {
    format: &'static str,
    flow_id: String,
    lines: Vec<String>,
    open: Vec<String>,
    state: StreamState,
}

impl Emitter {
    pub fn new(format: &'static str, flow_id: impl Into<String>) -> Self {
        Self {
            format,
            flow_id: flow_id.into(),
            lines: Vec::new(),
            open: Vec::new(),
            state: StreamState::NotStarted,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn emit(&mut self, message: ServiceMessage) -> Result<()> {
        if self.state == StreamState::Finished {
            return Err(self.error(format!("'{}' emitted after the stream finished", message.name())));
        }
        self.lines.push(message.render(&self.flow_id));
        Ok(())
    }

    /// Emit `testSuiteStarted` and push the suite
    pub fn open_suite(&mut self, name: &str, location_hint: Option<String>) -> Result<()> {
        self.emit(
            ServiceMessage::new("testSuiteStarted")
                .attr("name", name)
                .attr_opt("locationHint", location_hint),
        )?;
        self.open.push(name.to_string());
        self.state = StreamState::SuiteOpen(self.open.len());
        Ok(())
    }

    /// Emit `testSuiteFinished` for the innermost open suite
    pub fn close_suite(&mut self) -> Result<()> {
        let name = self
            .open
            .pop()
            .ok_or_else(|| self.error("testSuiteFinished without an open suite".to_string()))?;
        self.emit(ServiceMessage::new("testSuiteFinished").attr("name", name))?;
        self.state = match self.open.len() {
            0 => StreamState::Finished,
            depth => StreamState::SuiteOpen(depth),
        };
        Ok(())
    }

    /// Joined output; fails if a suite is still open
    pub fn finish(self) -> Result<String> {
        if let Some(name) = self.open.last() {
            return Err(self.error(format!("suite '{}' was never finished", name)));
        }
        if self.lines.is_empty() {
            return Ok(String::new());
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    fn error(&self, message: String) -> ConvertError {
        ConvertError::render(self.format, message)
    }
}

/// Check that every `testSuiteStarted` line is closed by a matching
/// `testSuiteFinished` in stack order
pub fn is_well_nested(output: &str) -> bool {
    let mut stack: Vec<String> = Vec::new();
    for line in output.lines() {
        if let Some(name) = message_attr(line, "testSuiteStarted", "name") {
            stack.push(name);
        } else if let Some(name) = message_attr(line, "testSuiteFinished", "name") {
            if stack.pop().as_deref() != Some(name.as_str()) {
                return false;
            }
        }
    }
    stack.is_empty()
}

/// Unescaped attribute value of a message line with the given name
pub fn message_attr(line: &str, message: &str, key: &str) -> Option<String> {
    let body = line
        .strip_prefix("##teamcity[")?
        .strip_suffix(']')?
        .strip_prefix(message)?;
    if !body.starts_with(' ') {
        return None;
    }

    let needle = format!(" {}='", key);
    let start = body.find(&needle)? + needle.len();
    let rest = &body[start..];

    // Closing quote is the first `'` not escaped by `|`
    let mut escaped = false;
    for (idx, c) in rest.char_indices() {
        match c {
            '|' if !escaped => escaped = true,
            '\'' if !escaped => return Some(unescape(&rest[..idx])),
            _ => escaped = false,
        }
    }
    None
}
