//! Python bindings for the CLIP tokenizer
//!
//! ```python
//! from clip_tokenizer import CLIPTokenizer
//!
//! tok = CLIPTokenizer("bpe_simple_vocab_16e6.txt.gz")
//! ids = tok.encode("a photo of a cat")
//! tok.decode(ids)
//! ```

use pyo3::prelude::*;

mod error;
mod tokenizer;

use error::TokenizerError;
use tokenizer::PyTokenizer;

#[pymodule]
fn clip_tokenizer(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTokenizer>()?;
    m.add("TokenizerError", m.py().get_type_bound::<TokenizerError>())?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
