//! InkML reading and writing.
//!
//! The reader walks a parsed XML tree ([`roxmltree`]) and populates an
//! [`inkline_model::InkDocument`], decoding every trace's packet text on
//! the way in. The writer serializes a document back to InkML with
//! [`quick_xml`]. Both sides tolerate the dialect quirks of real files:
//! elements matched by local name regardless of namespace, `xml:id` with a
//! plain `id` fallback, and vendor elements skipped rather than rejected.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::InkmlError;
pub use reader::{read_document, LoadOptions};
pub use writer::write_document;

pub(crate) const INKML_NS: &str = "http://www.w3.org/2003/InkML";
pub(crate) const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Formats a float attribute value, trimming ".0" off integral values.
pub(crate) fn fmt_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
