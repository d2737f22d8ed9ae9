use super::{FileId, Location};
use std::rc::Rc;
use text_size::TextSize;

/// Owns a single file's contents as a byte buffer.
///
/// No I/O beyond the initial load: callers hand in already-read text, and
/// the driver is responsible for reading the file from disk. The text is
/// kept behind an `Rc<str>` so
/// a [`Cursor`] can own a cheap clone of it instead of borrowing from the
/// buffer, which would otherwise tie every lexer/parser to the lifetime of
/// the [`crate::project::DependencyGraph`] that owns the buffer — exactly
/// the kind of borrow a sub-parser recursing back into the graph to
/// resolve an `INCLUDE` cannot hold at the same time as a `&mut` into it.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    file: FileId,
    text: Rc<str>,
}

impl SourceBuffer {
    pub fn new(file: FileId, text: impl Into<Rc<str>>) -> Self {
        Self {
            file,
            text: text.into(),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// A fresh cursor positioned at the start of the buffer.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            file: self.file,
            text: Rc::clone(&self.text),
            offset: 0,
            row0: 0,
            col0: 0,
        }
    }
}

/// A mutable `(byte_offset, row, column)` cursor over a source text.
///
/// Rows/columns are tracked zero-indexed internally and exposed one-indexed
/// through [`Cursor::location`]: newlines advance the row and reset the
/// column; every other byte advances the column.
pub struct Cursor {
    file: FileId,
    text: Rc<str>,
    offset: usize,
    row0: u32,
    col0: u32,
}

impl Cursor {
    pub fn offset(&self) -> TextSize {
        TextSize::try_from(self.offset).expect("source files are well under 4GiB")
    }

    /// The location of the next unread byte.
    pub fn location(&self) -> Location {
        Location::new(self.file, self.row0 + 1, self.col0 + 1)
    }

    /// The unread remainder of the buffer.
    pub fn remainder(&self) -> &str {
        &self.text[self.offset..]
    }

    /// The full source text the cursor is walking over.
    pub fn source(&self) -> &str {
        &self.text
    }

    pub fn at_eof(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// Advance the cursor past `consumed` bytes of the remainder, updating
    /// row/column as it walks over them byte-by-byte.
    pub fn advance(&mut self, consumed: usize) {
        for &b in self.remainder().as_bytes()[..consumed].iter() {
            if b == b'\n' {
                self.row0 += 1;
                self.col0 = 0;
            } else {
                self.col0 += 1;
            }
        }
        self.offset += consumed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_tracks_rows_and_columns() {
        let buf = SourceBuffer::new(FileId::new(0), "ab\ncd".to_string());
        let mut cursor = buf.cursor();
        assert_eq!(cursor.location().row, 1);
        assert_eq!(cursor.location().column, 1);
        cursor.advance(2); // consume "ab"
        assert_eq!(cursor.location().row, 1);
        assert_eq!(cursor.location().column, 3);
        cursor.advance(1); // consume "\n"
        assert_eq!(cursor.location().row, 2);
        assert_eq!(cursor.location().column, 1);
        cursor.advance(2); // consume "cd"
        assert!(cursor.at_eof());
    }
}
