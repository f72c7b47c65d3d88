use crate::error::{Result, XtringError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
enum BufferType {
    Original,
    Add,
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    buffer: BufferType,
    start: usize,
    length: usize,
}

impl Piece {
    fn new(buffer: BufferType, start: usize, length: usize) -> Self {
        Self {
            buffer,
            start,
            length,
        }
    }
}

/// Piece table edited in place by the region walker.
///
/// Offsets are UTF-8 byte offsets into the current text. Every edit validates
/// its offsets against the current length and character boundaries; nothing
/// is clamped, so a bad offset surfaces as an error instead of silently
/// shifting the text around it.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    original: String,
    add: String,
    pieces: Vec<Piece>,
    total_length: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(text: String) -> Self {
        let length = text.len();
        Self {
            original: text,
            add: String::new(),
            pieces: if length > 0 {
                vec![Piece::new(BufferType::Original, 0, length)]
            } else {
                Vec::new()
            },
            total_length: length,
        }
    }

    pub fn len(&self) -> usize {
        self.total_length
    }

    pub fn is_empty(&self) -> bool {
        self.total_length == 0
    }

    // Piece boundaries are always character boundaries, so this never panics.
    fn piece_text(&self, piece: &Piece) -> &str {
        let source = match piece.buffer {
            BufferType::Original => &self.original,
            BufferType::Add => &self.add,
        };
        &source[piece.start..piece.start + piece.length]
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.total_length {
            return Err(XtringError::RegionOutOfRange {
                start: offset,
                end: offset,
                len: self.total_length,
            });
        }

        let mut current_offset = 0;
        for piece in &self.pieces {
            let piece_end = current_offset + piece.length;
            if offset < piece_end {
                if !self.piece_text(piece).is_char_boundary(offset - current_offset) {
                    return Err(XtringError::NotCharBoundary { offset });
                }
                return Ok(());
            }
            current_offset = piece_end;
        }

        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end > self.total_length {
            return Err(XtringError::RegionOutOfRange {
                start,
                end,
                len: self.total_length,
            });
        }
        self.check_offset(start)?;
        self.check_offset(end)
    }

    /// Makes sure a piece starts exactly at `offset`, splitting the piece that
    /// contains it if needed. Returns that piece's index (`pieces.len()` when
    /// `offset` is the end of the text).
    fn split_at(&mut self, offset: usize) -> usize {
        let mut current_offset = 0;

        for i in 0..self.pieces.len() {
            if offset == current_offset {
                return i;
            }

            let piece = self.pieces[i];
            let piece_end = current_offset + piece.length;

            if offset < piece_end {
                let split_point = offset - current_offset;
                let left_piece = Piece::new(piece.buffer, piece.start, split_point);
                let right_piece = Piece::new(
                    piece.buffer,
                    piece.start + split_point,
                    piece.length - split_point,
                );

                self.pieces[i] = left_piece;
                self.pieces.insert(i + 1, right_piece);
                return i + 1;
            }

            current_offset = piece_end;
        }

        self.pieces.len()
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.check_offset(offset)?;
        if text.is_empty() {
            return Ok(());
        }

        let add_start = self.add.len();
        self.add.push_str(text);

        let index = self.split_at(offset);
        self.pieces
            .insert(index, Piece::new(BufferType::Add, add_start, text.len()));
        self.total_length += text.len();
        Ok(())
    }

    /// Deletes the half-open span `start..end`.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(());
        }

        let first = self.split_at(start);
        let last = self.split_at(end);
        self.pieces.drain(first..last);
        self.total_length -= end - start;
        Ok(())
    }

    pub fn replace(&mut self, start: usize, end: usize, replacement: &str) -> Result<()> {
        self.delete(start, end)?;
        self.insert(start, replacement)
    }

    pub fn substring(&self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;

        let mut result = String::with_capacity(end - start);
        let mut current_offset = 0;

        for piece in &self.pieces {
            if current_offset >= end {
                break;
            }

            let piece_end = current_offset + piece.length;
            if piece_end > start {
                let from = start.saturating_sub(current_offset);
                let to = (end - current_offset).min(piece.length);
                result.push_str(&self.piece_text(piece)[from..to]);
            }

            current_offset = piece_end;
        }

        Ok(result)
    }

    pub fn get_text(&self) -> String {
        let mut result = String::with_capacity(self.total_length);
        for piece in &self.pieces {
            result.push_str(self.piece_text(piece));
        }
        result
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            f.write_str(self.piece_text(piece))?;
        }
        Ok(())
    }
}
