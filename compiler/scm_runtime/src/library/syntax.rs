//! Syntax library: binds each special-form keyword to its marker.

use super::Library;
use crate::value::{SyntaxForm, Value};

pub(super) fn bind_keywords(library: Library) -> Library {
    SyntaxForm::ALL
        .into_iter()
        .fold(library, |library, form| {
            library.bind(form.keyword(), Value::Syntax(form))
        })
}
