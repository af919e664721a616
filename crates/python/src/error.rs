//! Error handling for Python bindings

use cliptok::TokenizerError as RustTokenizerError;
use pyo3::{create_exception, exceptions::PyRuntimeError, PyErr};

create_exception!(
    clip_tokenizer,
    TokenizerError,
    PyRuntimeError,
    "Error while loading the merge resource or tokenizing"
);

/// Convert a Rust TokenizerError to a Python exception
pub trait IntoPyErr {
    fn into_py_err(self) -> PyErr;
}

impl IntoPyErr for RustTokenizerError {
    fn into_py_err(self) -> PyErr {
        TokenizerError::new_err(self.to_string())
    }
}
