//! Client-wide default fields merged into every outgoing request

use std::collections::HashMap;

use sip2_core::Request;

/// Mapping of field code to value applied to every request before
/// serialization.
///
/// Later `set` calls overwrite earlier ones for the same code. Keys are
/// unique, so application order carries no meaning; precedence against
/// fields already on the request is decided by the request itself.
#[derive(Debug, Clone, Default)]
pub struct DefaultFieldSet {
    fields: HashMap<String, String>,
}

impl DefaultFieldSet {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Set or overwrite a default.
    pub fn set(&mut self, code: &str, value: &str) {
        self.fields.insert(code.to_string(), value.to_string());
    }

    /// Current value for a code.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.fields.get(code).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge every default into the request.
    pub fn apply<R: Request + ?Sized>(&self, request: &mut R) {
        for (code, value) in &self.fields {
            request.apply_default(code, value);
        }
    }
}
