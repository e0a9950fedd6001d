//! Append-only transcript with a live input region.
//!
//! The transcript owns everything the session has rendered: prompts,
//! echoed input, command output, and error text. The tail of the
//! transcript is the live input region - the one mutable span, holding
//! the command currently being composed.
//!
//! The boundary invariant is structural rather than policed: frozen
//! segments and the live region are separate fields, and every edit
//! operation only touches the region. No caller can reach across the
//! boundary because no API crosses it.

/// Visual category of a transcript segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStyle {
    /// The `cwd$ ` prompt string.
    Prompt,
    /// Echo of a submitted line.
    Input,
    /// Normal command or status output.
    Output,
    /// Error text (stderr, rejections, failed built-ins).
    Error,
}

/// One frozen chunk of transcript text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: SegmentStyle,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// The session transcript plus the live input region at its tail.
#[derive(Debug, Default)]
pub struct Transcript {
    /// Frozen, append-only segments.
    segments: Vec<Segment>,
    /// The command being composed. Always logically after every segment.
    input: String,
    /// Cursor position within the input region, in chars.
    cursor: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends frozen text. Only the session engine calls this.
    pub fn append(&mut self, text: impl Into<String>, style: SegmentStyle) {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment::new(text, style));
        }
    }

    /// Appends the prompt and resets the live input region.
    pub fn open_region(&mut self, prompt: &str) {
        self.append(prompt.to_string(), SegmentStyle::Prompt);
        self.input.clear();
        self.cursor = 0;
    }

    /// Freezes the typed line as an input segment and returns it.
    ///
    /// The region is consumed exactly once per submission; the returned
    /// line is what the pipeline controller works with.
    pub fn take_submission(&mut self) -> String {
        let line = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.append(format!("{line}\n"), SegmentStyle::Input);
        line
    }

    /// Drops all frozen segments. The live region and history survive.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Current live input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Cursor offset within the live input, in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the whole live region (history navigation).
    pub fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
        self.cursor = self.input.chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the char before the cursor. At the region start this is a
    /// no-op: the edit would cross the boundary.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.input.remove(at);
        self.cursor -= 1;
    }

    /// Deletes the char under the cursor.
    pub fn delete(&mut self) {
        if self.cursor >= self.input.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.input.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    fn byte_index(&self, char_offset: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_offset)
            .map_or(self.input.len(), |(i, _)| i)
    }
}
