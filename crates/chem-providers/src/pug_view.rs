// pug_view.rs
//
// Parseo del documento PUG View (XML) de la sección "Dissociation
// Constants". Sólo interesa el primer `Information`: su `Reference` hijo y
// el primer `String` descendiente.
use crate::{ProviderError, PugViewInformation};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

pub const PUG_VIEW_NS: &[u8] = b"http://pubchem.ncbi.nlm.nih.gov/pug_view";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
  Reference,
  Value,
}

fn is_pug_view(ns: &ResolveResult<'_>) -> bool {
  matches!(ns, ResolveResult::Bound(Namespace(n)) if *n == PUG_VIEW_NS)
}

/// Extrae la referencia y el valor del primer nodo `Information`.
///
/// Devuelve `Ok(None)` si el documento no tiene `Information` o si éste no
/// contiene un `Reference` hijo y un `String` con texto.
pub fn parse_dissociation_information(xml: &str) -> Result<Option<PugViewInformation>, ProviderError> {
  let mut reader = NsReader::from_str(xml);
  reader.config_mut().trim_text(true);

  // profundidad relativa al `Information` abierto (0 = fuera)
  let mut info_depth = 0usize;
  let mut capture: Option<Capture> = None;
  let mut buffer = String::new();
  let mut reference: Option<String> = None;
  let mut value: Option<String> = None;

  loop {
    let (ns, event) = reader.read_resolved_event()?;
    match event {
      Event::Start(e) => {
        let local = e.local_name();
        let pug = is_pug_view(&ns);
        if info_depth == 0 {
          if pug && local.as_ref() == b"Information" {
            info_depth = 1;
          }
          continue;
        }
        info_depth += 1;
        if capture.is_none() && pug {
          if info_depth == 2 && local.as_ref() == b"Reference" && reference.is_none() {
            capture = Some(Capture::Reference);
            buffer.clear();
          } else if local.as_ref() == b"String" && value.is_none() {
            capture = Some(Capture::Value);
            buffer.clear();
          }
        }
      }
      Event::Text(t) if capture.is_some() => {
        buffer.push_str(&t.unescape()?);
      }
      Event::CData(t) if capture.is_some() => {
        buffer.push_str(&String::from_utf8_lossy(&t.into_inner()));
      }
      Event::End(_) if info_depth > 0 => {
        if let Some(kind) = capture.take() {
          let text = std::mem::take(&mut buffer);
          match kind {
            Capture::Reference if !text.is_empty() => reference = Some(text),
            Capture::Reference => {}
            Capture::Value if !text.is_empty() => value = Some(text),
            Capture::Value => {}
          }
        }
        info_depth -= 1;
        if info_depth == 0 {
          break;
        }
      }
      Event::Eof => break,
      _ => {}
    }
  }

  match (reference, value) {
    (Some(reference), Some(value)) => Ok(Some(PugViewInformation { reference, value })),
    _ => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const ACETIC_ACID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Record xmlns="http://pubchem.ncbi.nlm.nih.gov/pug_view">
  <RecordType>CID</RecordType>
  <RecordNumber>176</RecordNumber>
  <Section>
    <TOCHeading>Chemical and Physical Properties</TOCHeading>
    <Section>
      <TOCHeading>Dissociation Constants</TOCHeading>
      <Information>
        <ReferenceNumber>12</ReferenceNumber>
        <Reference>Serjeant, E.P., Dempsey B.; Ionisation Constants</Reference>
        <Value>
          <StringWithMarkup>
            <String>pKa = 4.76 at 25 &#176;C</String>
          </StringWithMarkup>
        </Value>
      </Information>
      <Information>
        <ReferenceNumber>13</ReferenceNumber>
        <Reference>Otra referencia</Reference>
        <Value><StringWithMarkup><String>pKa = 4.8</String></StringWithMarkup></Value>
      </Information>
    </Section>
  </Section>
  <Reference>
    <ReferenceNumber>12</ReferenceNumber>
    <SourceName>HSDB</SourceName>
  </Reference>
</Record>"#;

  #[test]
  fn extracts_first_information_node() {
    let info = parse_dissociation_information(ACETIC_ACID).unwrap().expect("information");
    assert_eq!(info.value, "pKa = 4.76 at 25 °C");
    assert_eq!(info.reference, "Serjeant, E.P., Dempsey B.; Ionisation Constants");
  }

  #[test]
  fn document_without_information_yields_none() {
    let xml = r#"<Fault xmlns="http://pubchem.ncbi.nlm.nih.gov/pug_view"><Code>PUGVIEW.NotFound</Code></Fault>"#;
    assert_eq!(parse_dissociation_information(xml).unwrap(), None);
  }

  #[test]
  fn elements_outside_pug_view_namespace_are_ignored() {
    let xml = r#"<Record><Information><String>pKa = 1.0</String></Information></Record>"#;
    assert_eq!(parse_dissociation_information(xml).unwrap(), None);
  }

  #[test]
  fn information_without_reference_yields_none() {
    let xml = r#"<Record xmlns="http://pubchem.ncbi.nlm.nih.gov/pug_view">
      <Information><Value><StringWithMarkup><String>-1.86</String></StringWithMarkup></Value></Information>
    </Record>"#;
    assert_eq!(parse_dissociation_information(xml).unwrap(), None);
  }

  #[test]
  fn information_without_value_yields_none() {
    let xml = r#"<Record xmlns="http://pubchem.ncbi.nlm.nih.gov/pug_view">
      <Information><Reference>CRC Handbook</Reference><Value><Number>4.2</Number></Value></Information>
    </Record>"#;
    assert_eq!(parse_dissociation_information(xml).unwrap(), None);
  }

  #[test]
  fn malformed_document_is_an_xml_error() {
    let xml = r#"<Record xmlns="http://pubchem.ncbi.nlm.nih.gov/pug_view"><Information></Record>"#;
    assert!(matches!(parse_dissociation_information(xml), Err(ProviderError::Xml(_))));
  }
}
