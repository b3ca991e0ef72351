/// Text accumulated from transcription chunks of the current session
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    /// Append a chunk, separated by one space, trimming both ends
    pub fn append(&mut self, chunk: &str) {
        let joined = format!("{} {}", self.text, chunk);
        self.text = joined.trim().to_string();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
