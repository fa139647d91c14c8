use std::collections::HashMap;

/// Per-session navigation and annotation state.
///
/// Owns the active image pointer and the notes map for the whole batch. The
/// pipeline components never see this struct; they receive only the active
/// image's slice of it.
#[derive(Debug, Default)]
pub struct SessionState {
    num_images: usize,
    current_index: usize,
    notes: HashMap<String, Vec<String>>,
}

impl SessionState {
    pub fn new(num_images: usize) -> Self {
        Self {
            num_images,
            current_index: 0,
            notes: HashMap::new(),
        }
    }

    pub fn num_images(&self) -> usize {
        self.num_images
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Jump to an image. An index past the end resets to the first image,
    /// mirroring what happens when a smaller batch replaces a larger one.
    pub fn set_current_index(&mut self, index: usize) {
        self.current_index = if index < self.num_images { index } else { 0 };
    }

    pub fn next(&mut self) {
        if self.current_index + 1 < self.num_images {
            self.current_index += 1;
        }
    }

    pub fn prev(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Append a free-text note to an image. Empty or whitespace-only input
    /// is rejected without mutating anything; everything else is appended
    /// as-is, never deduplicated or edited in place.
    pub fn add_note(&mut self, image_id: &str, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.notes
            .entry(image_id.to_string())
            .or_default()
            .push(text.to_string());
        true
    }

    /// Notes for one image in append order; empty slice when none exist.
    pub fn notes(&self, image_id: &str) -> &[String] {
        self.notes.get(image_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
