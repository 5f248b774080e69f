//! InkML reader: XML tree to document model.

use crate::{InkmlError, XML_NS};
use inkline_codec::decode;
use inkline_model::{
    Brush, BrushProperty, Channel, ChannelProperty, Context, InkDocument, InkSource, ModelError,
    Timestamp, Trace, TraceFormat,
};
use roxmltree::Node;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Output resolution baked into each context's derived scale factors.
    pub dpi: f64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { dpi: 150.0 }
    }
}

/// Parses InkML text into a document.
///
/// Only malformed XML is an error. Structurally deficient entities are
/// reported and skipped or defaulted; the worst outcome is an incompletely
/// populated document.
pub fn read_document(xml: &str, options: &LoadOptions) -> Result<InkDocument, InkmlError> {
    let tree = roxmltree::Document::parse(xml)?;
    let mut document = InkDocument::new();

    // Contexts first: traces need them resolved to know their channel
    // layout while decoding.
    for node in elements_named(&tree, "context") {
        let Some(id) = element_id(&node) else {
            // Files mixing inkml and vendor namespaces carry contexts
            // without the required xml:id (e.g. msink); skip those.
            continue;
        };
        let ink_source = find_child(&node, "inkSource").and_then(|n| parse_ink_source(&n));
        let timestamp = find_child(&node, "timestamp").map(|n| Timestamp {
            id: element_id(&n),
            time_string: n.attribute("timeString").map(str::to_string),
        });
        document.insert_context(Context::new(id, ink_source, timestamp, options.dpi));
    }

    for node in elements_named(&tree, "brush") {
        let Some(id) = element_id(&node) else {
            log::warn!("{}", ModelError::BrushMissingId);
            continue;
        };
        document.insert_brush(parse_brush(&node, id));
    }

    for node in elements_named(&tree, "trace") {
        parse_trace(&node, &mut document);
    }

    Ok(document)
}

/// All elements with the given local name, in document order. The
/// namespace is deliberately ignored: real files qualify these elements
/// inconsistently.
fn elements_named<'a, 'input>(
    tree: &'a roxmltree::Document<'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    tree.root()
        .descendants()
        .filter(move |node| node.is_element() && node.tag_name().name() == name)
}

fn find_child<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|child| child.is_element() && child.tag_name().name() == name)
}

/// `xml:id`, falling back to a plain `id` attribute for producers (and
/// parsers) that mishandle the namespaced form.
fn element_id(node: &Node) -> Option<String> {
    node.attribute((XML_NS, "id"))
        .or_else(|| node.attribute("id"))
        .map(str::to_string)
}

/// Strips the URI-fragment `#` prefix off a reference attribute.
fn parse_ref(value: &str) -> String {
    value.strip_prefix('#').unwrap_or(value).to_string()
}

fn parse_number(node: &Node, channel: &str, attribute: &str) -> Option<f64> {
    let value = node.attribute(attribute)?;
    match value.parse::<f64>() {
        Ok(number) => Some(number),
        Err(_) => {
            log::warn!(
                "{}",
                ModelError::BadNumericAttribute {
                    channel: channel.to_string(),
                    attribute: attribute.to_string(),
                    value: value.to_string(),
                }
            );
            None
        }
    }
}

fn parse_ink_source(node: &Node) -> Option<InkSource> {
    let id = element_id(node);

    let Some(format_node) = find_child(node, "traceFormat") else {
        log::warn!("{}", ModelError::MissingTraceFormat(id));
        return None;
    };

    let mut trace_format = TraceFormat::new(element_id(&format_node));
    for channel_node in format_node
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "channel")
    {
        let Some(name) = channel_node.attribute("name") else {
            log::warn!("channel without a name attribute; skipping");
            continue;
        };
        let mut channel = Channel::new(name);
        channel.kind = channel_node.attribute("type").map(str::to_string);
        channel.min = parse_number(&channel_node, name, "min").unwrap_or(0.0);
        channel.max = parse_number(&channel_node, name, "max");
        channel.units = channel_node.attribute("units").unwrap_or("").to_string();
        trace_format.push_channel(channel);
    }

    let mut channel_properties = Vec::new();
    for property_node in node
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "channelProperty")
    {
        let (Some(channel), Some(name)) = (
            property_node.attribute("channel"),
            property_node.attribute("name"),
        ) else {
            log::warn!("channelProperty without channel/name attributes; skipping");
            continue;
        };
        let Some(value) = parse_number(&property_node, channel, "value") else {
            continue;
        };
        channel_properties.push(ChannelProperty {
            channel: channel.to_string(),
            name: name.to_string(),
            value,
            units: property_node.attribute("units").unwrap_or("").to_string(),
        });
    }

    // Resolution properties refine their channel before the format is
    // sealed into a context.
    for property in &channel_properties {
        if property.name != "resolution" {
            continue;
        }
        match trace_format.channel_mut(&property.channel) {
            Some(channel) => {
                if let Err(problem) = channel.apply_resolution(property) {
                    log::warn!("{problem}");
                }
            }
            None => {
                log::debug!(
                    "resolution property for unknown channel '{}'; ignoring",
                    property.channel
                );
            }
        }
    }

    Some(InkSource { id, trace_format, channel_properties })
}

fn parse_brush(node: &Node, id: String) -> Brush {
    let mut brush = Brush::new(id);
    for property_node in node
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "brushProperty")
    {
        let Some(name) = property_node.attribute("name") else {
            log::warn!("brushProperty without a name attribute; skipping");
            continue;
        };
        brush.push_property(BrushProperty {
            name: name.to_string(),
            value: property_node.attribute("value").unwrap_or("").to_string(),
            units: property_node.attribute("units").map(str::to_string),
        });
    }
    brush
}

fn parse_trace(node: &Node, document: &mut InkDocument) {
    let context_ref = node.attribute("contextRef").map(parse_ref);
    let brush_ref = node.attribute("brushRef").map(parse_ref);

    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();

    // The declared channel layout, when the context resolves this early;
    // decode only uses it to flag token-count mismatches.
    let channel_count = context_ref
        .as_deref()
        .and_then(|id| document.context(id))
        .and_then(|context| context.trace_format())
        .map(|format| format.len())
        .unwrap_or(0);

    let decoded = decode(&text, channel_count);
    let trace = Trace {
        id: element_id(node),
        context_ref,
        brush_ref,
        time_offset: node.attribute("timeOffset").map(str::to_string),
        table: decoded.table,
    };
    document.fold_trace(trace, &decoded.aggregates);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
<inkml:ink xmlns:inkml="http://www.w3.org/2003/InkML">
  <inkml:definitions>
    <inkml:context xml:id="ctx0">
      <inkml:inkSource xml:id="src0">
        <inkml:traceFormat>
          <inkml:channel name="X" type="integer" max="12700" units="cm"/>
          <inkml:channel name="Y" type="integer" max="9500" units="cm"/>
          <inkml:channel name="F" type="integer" max="1023" units="dev"/>
        </inkml:traceFormat>
        <inkml:channelProperties>
          <inkml:channelProperty channel="X" name="resolution" value="1000" units="1/cm"/>
          <inkml:channelProperty channel="Y" name="resolution" value="1000" units="1/cm"/>
        </inkml:channelProperties>
      </inkml:inkSource>
      <inkml:timestamp xml:id="ts0" timeString="2011-03-07T21:44:20Z"/>
    </inkml:context>
    <inkml:brush xml:id="br0">
      <inkml:brushProperty name="width" value="0.1" units="cm"/>
      <inkml:brushProperty name="color" value="#0000FF"/>
      <inkml:brushProperty name="tip" value="ellipse"/>
    </inkml:brush>
  </inkml:definitions>
  <inkml:trace xml:id="t0" contextRef="#ctx0" brushRef="#br0" timeOffset="0">10 20 500,5 5 10,1 1 1</inkml:trace>
  <inkml:trace contextRef="#ctx0" brushRef="#br0">100 200 400</inkml:trace>
</inkml:ink>
"##;

    #[test]
    fn test_reads_contexts_brushes_traces() {
        let document = read_document(SAMPLE, &LoadOptions::default()).unwrap();
        assert_eq!(document.contexts().count(), 1);
        assert_eq!(document.brushes().count(), 1);
        assert_eq!(document.traces().len(), 2);

        let context = document.context("ctx0").unwrap();
        let format = context.trace_format().unwrap();
        assert_eq!(format.len(), 3);
        assert_eq!(format.channel("X").unwrap().resolution, 1000.0);
        assert_eq!(format.channel("F").unwrap().max, Some(1023.0));
        assert_eq!(
            context.timestamp.as_ref().unwrap().time_string.as_deref(),
            Some("2011-03-07T21:44:20Z")
        );
    }

    #[test]
    fn test_derived_factors_are_cached_on_context() {
        let document = read_document(SAMPLE, &LoadOptions::default()).unwrap();
        let factors = document.context("ctx0").unwrap().factors();
        // 1000 samples per cm -> 1 himetric per sample -> dpi/2540 pixels
        assert!((factors.x_factor - 150.0 / 2540.0).abs() < 1e-12);
        assert!((factors.f_factor - 1.0 / 1023.0).abs() < 1e-12);
        assert!((factors.f_neutral - 1023.0 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_trace_packet_is_decoded_and_folded() {
        let document = read_document(SAMPLE, &LoadOptions::default()).unwrap();
        let trace = &document.traces()[0];
        assert_eq!(trace.id.as_deref(), Some("t0"));
        assert_eq!(trace.context_ref.as_deref(), Some("ctx0"));
        assert_eq!(trace.brush_ref.as_deref(), Some("br0"));
        assert_eq!(
            trace.table,
            vec![vec![10, 20, 500], vec![15, 25, 510], vec![21, 31, 521]]
        );

        // aggregates span both traces
        assert_eq!(document.aggregates().count(0), 4);
        assert_eq!(document.aggregates().max(0), Some(100));
        assert_eq!(document.aggregates().min(0), Some(10));
    }

    #[test]
    fn test_anonymous_trace_has_no_id() {
        let document = read_document(SAMPLE, &LoadOptions::default()).unwrap();
        assert!(document.traces()[1].id.is_none());
    }

    #[test]
    fn test_brush_properties_are_retained_verbatim() {
        let document = read_document(SAMPLE, &LoadOptions::default()).unwrap();
        let brush = document.brush("br0").unwrap();
        assert_eq!(brush.color(), "#0000FF");
        assert_eq!(brush.width(), 100.0); // 0.1 cm in himetric
        let names: Vec<_> = brush.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["width", "color", "tip"]);
    }

    #[test]
    fn test_unqualified_elements_are_accepted() {
        let xml = r##"<ink><brush id="b"/><trace contextRef="#missing">1 2</trace></ink>"##;
        let document = read_document(xml, &LoadOptions::default()).unwrap();
        assert!(document.brush("b").is_some());
        assert_eq!(document.traces().len(), 1);
        assert_eq!(document.traces()[0].context_ref.as_deref(), Some("missing"));
    }

    #[test]
    fn test_brush_without_id_is_skipped() {
        let xml = r##"<ink><brush><brushProperty name="color" value="#FF0000"/></brush></ink>"##;
        let document = read_document(xml, &LoadOptions::default()).unwrap();
        assert_eq!(document.brushes().count(), 0);
    }

    #[test]
    fn test_context_without_id_is_skipped() {
        let xml = r#"<ink><context><inkSource/></context></ink>"#;
        let document = read_document(xml, &LoadOptions::default()).unwrap();
        assert_eq!(document.contexts().count(), 0);
    }

    #[test]
    fn test_ink_source_without_trace_format_is_dropped() {
        let xml = r#"<ink><context xml:id="c"><inkSource xml:id="s"/></context></ink>"#;
        let document = read_document(xml, &LoadOptions::default()).unwrap();
        let context = document.context("c").unwrap();
        assert!(context.ink_source.is_none());
        assert_eq!(context.factors(), Default::default());
    }

    #[test]
    fn test_mismatched_resolution_units_are_ignored() {
        let xml = r#"
<ink><context xml:id="c"><inkSource>
  <traceFormat><channel name="X" max="100" units="cm"/></traceFormat>
  <channelProperty channel="X" name="resolution" value="1000" units="1/in"/>
</inkSource></context></ink>"#;
        let document = read_document(xml, &LoadOptions::default()).unwrap();
        let format = document.context("c").unwrap().trace_format().unwrap();
        assert_eq!(format.channel("X").unwrap().resolution, 0.0);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(read_document("<ink>", &LoadOptions::default()).is_err());
    }
}
