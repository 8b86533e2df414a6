//! Output formats
//!
//!     xml       The document as markup, one root child per line (the usual output)
//!     treeviz   One line per node, for inspecting structure
//!     json      Serialized [snapshot](snapshot::NodeSnapshot)
//!     yaml      Serialized [snapshot](snapshot::NodeSnapshot)
//!
//! The [fragment] reader is the inverse of the xml writer.

pub mod fragment;
pub mod registry;
pub mod snapshot;
pub mod treeviz;
pub mod xml;

pub use fragment::{append_fragment, FragmentError};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use snapshot::{snapshot_from_document, NodeSnapshot};
pub use treeviz::to_treeviz_str;
pub use xml::to_xml;

use crate::doccy::tree::Document;

pub struct XmlFormatter;

impl Formatter for XmlFormatter {
    fn name(&self) -> &str {
        "xml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(doc.to_string())
    }

    fn description(&self) -> &str {
        "Markup of every top level node, one per line"
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&snapshot_from_document(doc))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Node snapshot as JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_yaml::to_string(&snapshot_from_document(doc))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Node snapshot as YAML"
    }
}
