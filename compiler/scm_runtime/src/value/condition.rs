//! Error objects created by `error` and `make-condition`.

use super::Value;

/// An error object: a message plus the irritants reported with it.
#[derive(Clone, Debug)]
pub struct Condition {
    message: String,
    irritants: Vec<Value>,
}

impl Condition {
    pub fn new(message: impl Into<String>, irritants: Vec<Value>) -> Self {
        Condition {
            message: message.into(),
            irritants,
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn irritants(&self) -> &[Value] {
        &self.irritants
    }
}
