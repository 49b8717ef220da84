//! Streaming parser for annotated string-resource files.
//!
//! The parser is an explicit state machine: at most one entry is open at a
//! time, and closing the element is the only transition that commits it.
//! Each call to [`StringFileParser::parse`] owns its own session, so one
//! parser can be shared across threads.

use std::{fs, path::Path};

use quick_xml::{Reader, events::BytesStart, events::Event};

use super::{
    KeepParent, ParsedFile, RevisionId, StringEntry,
    error::{Result, ValidationError},
};

pub const DEFAULT_STRING_ELEMENT: &str = "string";

const NAME_ATTRIBUTE: &[u8] = b"name";
const REVISION_ATTRIBUTE: &[u8] = b"rev";

#[derive(Debug, Clone)]
pub struct StringFileParser {
    elements: Vec<String>,
}

impl Default for StringFileParser {
    fn default() -> Self {
        Self::new(vec![DEFAULT_STRING_ELEMENT.to_string()])
    }
}

impl StringFileParser {
    /// Create a parser treating every element in `elements` as string-bearing.
    pub fn new(elements: Vec<String>) -> Self {
        Self { elements }
    }

    pub fn parse(&self, path: &Path) -> Result<ParsedFile> {
        let content = fs::read_to_string(path).map_err(|source| ValidationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&content, path)
    }

    /// Parse `content` as if it had been read from `path`.
    pub fn parse_str(&self, content: &str, path: &Path) -> Result<ParsedFile> {
        ParseSession::new(self, content, path).run()
    }

    fn is_string_element(&self, name: &[u8]) -> bool {
        self.elements.iter().any(|e| e.as_bytes() == name)
    }
}

/// Entry whose element has been opened but not yet closed.
#[derive(Debug)]
struct OpenEntry {
    entry: StringEntry,
    /// Element name that opened the entry, so only its own end tag closes it.
    element: Vec<u8>,
}

#[derive(Debug)]
enum ParseState {
    Idle,
    /// A string-bearing element without a `name`; its content is skipped.
    Ignoring { element: Vec<u8> },
    InEntry(OpenEntry),
}

struct ParseSession<'a> {
    parser: &'a StringFileParser,
    content: &'a str,
    path: &'a Path,
    line_index: Vec<usize>,
    state: ParseState,
    depth: usize,
    result: ParsedFile,
}

impl<'a> ParseSession<'a> {
    fn new(parser: &'a StringFileParser, content: &'a str, path: &'a Path) -> Self {
        Self {
            parser,
            content,
            path,
            line_index: build_line_index(content),
            state: ParseState::Idle,
            depth: 0,
            result: ParsedFile::new(path),
        }
    }

    fn run(mut self) -> Result<ParsedFile> {
        let mut reader = Reader::from_str(self.content);
        reader.config_mut().trim_text(false);

        loop {
            let offset = reader.buffer_position() as usize;
            let line = offset_to_line(&self.line_index, offset);

            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    let at = reader.error_position() as usize;
                    return Err(self.format_error(offset_to_line(&self.line_index, at), e));
                }
            };

            match event {
                Event::Start(e) => {
                    self.depth += 1;
                    self.on_start(&e, line)?;
                }
                Event::Empty(e) => {
                    self.on_start(&e, line)?;
                    self.on_end(e.name().as_ref(), line);
                }
                Event::End(e) => {
                    self.depth = self.depth.saturating_sub(1);
                    self.on_end(e.name().as_ref(), line);
                }
                Event::Text(e) => {
                    if matches!(self.state, ParseState::InEntry(_)) {
                        let text = e.unescape().map_err(|err| self.format_error(line, err))?;
                        self.append(&text);
                    }
                }
                Event::CData(e) => self.append(&String::from_utf8_lossy(&e)),
                Event::Comment(e) => self.on_comment(&String::from_utf8_lossy(&e), line),
                Event::Eof => break,
                _ => {}
            }
        }

        if self.depth > 0 || !matches!(self.state, ParseState::Idle) {
            let line = self.line_index.len();
            return Err(self.format_error(line, "unexpected end of document"));
        }

        Ok(self.result)
    }

    fn on_start(&mut self, element: &BytesStart<'_>, line: usize) -> Result<()> {
        let name = element.name();
        if !self.parser.is_string_element(name.as_ref()) {
            return Ok(());
        }

        if let ParseState::InEntry(open) = &self.state {
            let message = format!(
                "string element opened inside entry '{}' started on line {}",
                open.entry.name, open.entry.start_line
            );
            return Err(self.format_error(line, message));
        }

        let Some(entry_name) = self.attribute(element, NAME_ATTRIBUTE, line)? else {
            self.state = ParseState::Ignoring {
                element: name.as_ref().to_vec(),
            };
            return Ok(());
        };

        let mut entry = StringEntry::new(entry_name, line);
        if let Some(rev) = self.attribute(element, REVISION_ATTRIBUTE, line)? {
            entry.revisions.insert(RevisionId::new(rev));
        }

        self.state = ParseState::InEntry(OpenEntry {
            entry,
            element: name.as_ref().to_vec(),
        });
        Ok(())
    }

    fn on_end(&mut self, name: &[u8], line: usize) {
        let closes_current = match &self.state {
            ParseState::Idle => false,
            ParseState::Ignoring { element } => element.as_slice() == name,
            ParseState::InEntry(open) => open.element.as_slice() == name,
        };
        if !closes_current {
            return;
        }

        if let ParseState::InEntry(mut open) = std::mem::replace(&mut self.state, ParseState::Idle) {
            open.entry.end_line = line;
            self.commit(open.entry);
        }
    }

    /// Character data only counts while an entry is open.
    fn append(&mut self, text: &str) {
        if let ParseState::InEntry(open) = &mut self.state {
            open.entry.value.push_str(text);
        }
    }

    fn on_comment(&mut self, text: &str, line: usize) {
        let Some(annotation) = KeepParent::parse(text) else {
            return;
        };

        let mut entry = StringEntry::new(annotation.name, line);
        entry.inherits_from_parent = true;
        if let Some(revision) = annotation.revision {
            entry.revisions.insert(revision);
        }
        self.commit(entry);
    }

    fn commit(&mut self, entry: StringEntry) {
        let name = entry.name.clone();
        if let Some(previous) = self.result.insert(entry) {
            tracing::debug!(
                file = %self.path.display(),
                key = %name,
                previous_line = previous.start_line,
                "duplicate entry overwrites earlier definition"
            );
        }
    }

    fn attribute(
        &self,
        element: &BytesStart<'_>,
        key: &[u8],
        line: usize,
    ) -> Result<Option<String>> {
        let attr = element
            .try_get_attribute(key)
            .map_err(|e| self.format_error(line, e))?;
        match attr {
            Some(attr) => {
                let value = attr
                    .unescape_value()
                    .map_err(|e| self.format_error(line, e))?;
                Ok(Some(value.into_owned()))
            }
            None => Ok(None),
        }
    }

    fn format_error(&self, line: usize, message: impl ToString) -> ValidationError {
        ValidationError::Format {
            path: self.path.to_path_buf(),
            line,
            message: message.to_string(),
        }
    }
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Returns the 1-based line containing `offset`.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
