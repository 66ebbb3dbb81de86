//! Handler implementations, one `impl FileApi` block per file.

mod list;
mod upload;
mod url;
