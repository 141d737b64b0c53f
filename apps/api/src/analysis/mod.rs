// Résumé review flow: upload parsing, text extraction, truncation, and the
// handlers that sequence them around the suggestion client.

pub mod extractor;
pub mod handlers;
pub mod truncate;
pub mod upload;
