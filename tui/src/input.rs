//! Draft Input
//!
//! The text box under the conversation. Length is enforced here, at the UI
//! boundary: once the draft holds `max_chars` characters further typing is
//! refused.

/// Editable draft with a character limit
#[derive(Clone, Debug)]
pub struct InputBuffer {
    text: String,
    max_chars: usize,
}

impl InputBuffer {
    /// Create an empty draft that accepts up to `max_chars` characters
    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            max_chars,
        }
    }

    /// Append a character; returns false if the draft is full
    pub fn push(&mut self, c: char) -> bool {
        if self.char_count() >= self.max_chars {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Remove the last character
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Current draft text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the draft
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Character limit
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Whether the draft has nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Take the draft, leaving it empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// `used/max` counter shown beside the input box
    pub fn counter(&self) -> String {
        format!("{}/{}", self.char_count(), self.max_chars)
    }

    /// Whether the draft is within 10% of the limit
    pub fn near_limit(&self) -> bool {
        self.char_count() * 10 >= self.max_chars * 9
    }
}
