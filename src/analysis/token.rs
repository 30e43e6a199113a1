use serde::{Serialize, Deserialize};

/// Token representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,      // The token text
    pub position: u32,     // Position within the field
    pub offset: usize,     // Byte offset in the cleaned text
    pub length: usize,     // Token length in bytes
}

impl Token {
    pub fn new(text: String, position: u32, offset: usize) -> Self {
        let length = text.len();
        Token {
            text,
            position,
            offset,
            length,
        }
    }

    /// Rewrite the token text, keeping `length` in step with it. Filters
    /// that change the text must go through here.
    pub fn set_text(&mut self, text: String) {
        self.length = text.len();
        self.text = text;
    }
}
