//! The fixed instruction prompt sent with every page image.
//!
//! Keeping the prompt in one place means changing the extraction behaviour
//! requires editing exactly one constant, and unit tests can inspect it
//! without a live vision model. The wording asks for Markdown suitable for
//! Retrieval-Augmented Generation pipelines and forbids commentary, so the
//! response body can be used verbatim as the page's text.

/// Process-wide instruction prompt, identical for every page.
pub const PAGE_PROMPT: &str = "Please extract the text from this image and provide a description in markdown \
format suitable for use with Retrieval-Augmented Generation (RAG) systems. \
Output only the content of the page, without any additional information, \
questions, or commentary.";
