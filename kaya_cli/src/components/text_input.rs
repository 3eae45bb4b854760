/// Single-line text field state

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    max_chars: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            value: String::new(),
            max_chars: Some(max_chars),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns false when the field is full or `c` is a control character
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        if let Some(max) = self.max_chars {
            if self.value.chars().count() >= max {
                return false;
            }
        }
        self.value.push(c);
        true
    }

    /// Append pasted text, dropping newlines and anything past the limit
    pub fn push_str(&mut self, text: &str) {
        for c in text.chars() {
            if !self.push(c) && !c.is_control() {
                break;
            }
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}
