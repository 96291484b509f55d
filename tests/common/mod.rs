#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use roadmap_optimizer::{ContentGenerator, ModelError};

pub const TWO_FEATURE_REPLY: &str = "```json
[
  {\"name\": \"Dark Mode\", \"R\": 6, \"I\": 4, \"C\": 9, \"E\": 2, \"rice_score\": 108},
  {\"name\": \"Voice Search\", \"R\": 8, \"I\": 9, \"C\": 7, \"E\": 3, \"rice_score\": 168}
]
```";

/// Stand-in for the hosted model: returns a canned reply and records calls.
pub struct FakeModel {
    reply: Result<String, ModelError>,
    pub calls: Cell<usize>,
    pub last_credential: RefCell<String>,
    pub last_prompt: RefCell<String>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self::with(Ok(text.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Err(ModelError::new(message)))
    }

    fn with(reply: Result<String, ModelError>) -> Self {
        Self {
            reply,
            calls: Cell::new(0),
            last_credential: RefCell::new(String::new()),
            last_prompt: RefCell::new(String::new()),
        }
    }
}

impl ContentGenerator for FakeModel {
    fn generate(&self, credential: &str, prompt: &str) -> Result<String, ModelError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_credential.borrow_mut() = credential.to_string();
        *self.last_prompt.borrow_mut() = prompt.to_string();
        self.reply.clone()
    }
}
