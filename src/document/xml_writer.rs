use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use failure::Error;
use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::document::{ExportDocument, PositionEntry, ResourceEntry, ResourcePayload};
use crate::model::{Category, MeasuredValueColumn};
use crate::settings::ExportSettings;

/// This writer renders an `ExportDocument` as an import configuration XML file.
#[derive(Debug)]
pub struct XmlWriter<'s> {
    export_settings: &'s ExportSettings,
}

impl<'s> XmlWriter<'s> {
    pub fn new(export_settings: &'s ExportSettings) -> Self {
        Self { export_settings }
    }

    /// Write the document into the given file path.
    pub fn to_path(&self, document: &ExportDocument, path: &Path) -> Result<(), Error> {
        let output_file = File::create(path)?;
        let mut output = BufWriter::new(output_file);

        self.write(document, &mut output)?;
        output.flush()?;

        debug!("Wrote import configuration to {}", path.display());

        Ok(())
    }

    pub fn to_bytes(&self, document: &ExportDocument) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.write(document, &mut bytes)?;
        Ok(bytes)
    }

    fn write<W: Write>(&self, document: &ExportDocument, output: W) -> Result<(), Error> {
        let mut writer = if self.export_settings.indent > 0 {
            Writer::new_with_indent(output, b' ', self.export_settings.indent)
        } else {
            Writer::new(output)
        };

        writer.write_event(Event::Decl(BytesDecl::new(b"1.0", Some(b"UTF-8" as &[u8]), None)))?;

        let mut root = BytesStart::borrowed_name(b"SosImportConfiguration");
        root.push_attribute(("xmlns", self.export_settings.namespace.as_str()));
        writer.write_event(Event::Start(root))?;

        start(&mut writer, "CsvMetadata")?;
        start(&mut writer, "ColumnAssignments")?;
        for column in document.columns() {
            write_column(&mut writer, column)?;
        }
        end(&mut writer, "ColumnAssignments")?;
        end(&mut writer, "CsvMetadata")?;

        start(&mut writer, "AdditionalMetadata")?;
        for &category in &Category::RESOLUTION_ORDER {
            for entry in document.entries_of(category) {
                start(&mut writer, category_element(category))?;
                write_resource(&mut writer, entry)?;
                end(&mut writer, category_element(category))?;
            }
        }
        end(&mut writer, "AdditionalMetadata")?;

        end(&mut writer, "SosImportConfiguration")?;

        Ok(())
    }
}

fn write_column<W: Write>(
    writer: &mut Writer<W>,
    column: &MeasuredValueColumn,
) -> Result<(), Error> {
    start(writer, "Column")?;
    text_element(writer, "Number", &column.index().to_string())?;
    text_element(writer, "Type", "MEASURED_VALUE")?;

    for &category in &Category::RESOLUTION_ORDER {
        for id in column.related(category) {
            start(writer, related_element(category))?;
            text_element(writer, "IdRef", id)?;
            end(writer, related_element(category))?;
        }
    }

    end(writer, "Column")
}

fn write_resource<W: Write>(writer: &mut Writer<W>, entry: &ResourceEntry) -> Result<(), Error> {
    let spatial = entry.category.is_spatial();

    match &entry.payload {
        ResourcePayload::Manual(manual) => {
            let element = if spatial {
                "ManualSpatialResource"
            } else {
                "ManualResource"
            };

            start(writer, element)?;
            text_element(writer, "ID", &manual.id)?;
            text_element(writer, "Name", &manual.name)?;
            text_element(writer, "URI", &manual.uri)?;
            write_position(writer, entry.position.as_ref())?;
            end(writer, element)
        }
        ResourcePayload::Generated(generated) => {
            let element = if spatial {
                "GeneratedSpatialResource"
            } else {
                "GeneratedResource"
            };

            start(writer, element)?;
            text_element(writer, "ID", &generated.id)?;

            let mut uri = BytesStart::borrowed_name(b"URI");
            uri.push_attribute((
                "useAsPrefix",
                if generated.use_as_prefix {
                    "true"
                } else {
                    "false"
                },
            ));
            match &generated.uri_prefix {
                Some(prefix) => {
                    writer.write_event(Event::Start(uri))?;
                    writer.write_event(Event::Text(BytesText::from_plain_str(prefix)))?;
                    writer.write_event(Event::End(BytesEnd::borrowed(b"URI")))?;
                }
                None => {
                    writer.write_event(Event::Empty(uri))?;
                }
            }

            text_element(writer, "ConcatString", &generated.concat_string)?;
            for number in &generated.numbers {
                text_element(writer, "Number", &number.to_string())?;
            }
            write_position(writer, entry.position.as_ref())?;
            end(writer, element)
        }
    }
}

fn write_position<W: Write>(
    writer: &mut Writer<W>,
    position: Option<&PositionEntry>,
) -> Result<(), Error> {
    match position {
        None => Ok(()),
        Some(PositionEntry::Group(group)) => {
            let mut element = BytesStart::borrowed_name(b"Position");
            element.push_attribute(("group", group.as_str()));
            writer.write_event(Event::Empty(element))?;
            Ok(())
        }
        Some(PositionEntry::Explicit {
            epsg_code,
            altitude,
            latitude,
            longitude,
        }) => {
            start(writer, "Position")?;
            text_element(writer, "EPSGCode", &epsg_code.to_string())?;
            text_element(writer, "Alt", &altitude.to_string())?;
            text_element(writer, "Lat", &latitude.to_string())?;
            text_element(writer, "Long", &longitude.to_string())?;
            end(writer, "Position")
        }
    }
}

fn category_element(category: Category) -> &'static str {
    match category {
        Category::FeatureOfInterest => "FeatureOfInterest",
        Category::ObservedProperty => "ObservedProperty",
        Category::UnitOfMeasurement => "UnitOfMeasurement",
        Category::Sensor => "Sensor",
    }
}

fn related_element(category: Category) -> &'static str {
    match category {
        Category::FeatureOfInterest => "RelatedFOI",
        Category::ObservedProperty => "RelatedObservedProperty",
        Category::UnitOfMeasurement => "RelatedUnitOfMeasurement",
        Category::Sensor => "RelatedSensor",
    }
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::borrowed_name(name.as_bytes())))?;
    Ok(())
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), Error> {
    writer.write_event(Event::End(BytesEnd::borrowed(name.as_bytes())))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), Error> {
    start(writer, name)?;
    writer.write_event(Event::Text(BytesText::from_plain_str(text)))?;
    end(writer, name)
}
