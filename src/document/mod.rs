mod entry;
mod entry_index;
mod export_document;
mod xml_writer;

pub use self::entry::{
    GeneratedPayload, ManualPayload, PositionEntry, ResourceEntry, ResourcePayload,
};
pub use self::export_document::ExportDocument;
pub use self::xml_writer::XmlWriter;
