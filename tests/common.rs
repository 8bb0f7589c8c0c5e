//! Common test fixtures: flow graphs and host documents.
use chrono::NaiveDate;
use radio2diac::prelude::*;

/// Two blocks wired `src -> snk`, plus the `samp_rate` variable block.
#[allow(dead_code)]
pub const SIMPLE_FLOWGRAPH: &str = r#"
options:
  parameters:
    id: simple
blocks:
- name: samp_rate
  id: variable
  parameters:
    comment: ''
    value: '32e3'
- name: src
  id: analog_sig_source_x
  parameters:
    affinity: ''
    alias: ''
    amp: '1'
    comment: ''
    freq: '1000'
    maxoutbuf: '0'
    minoutbuf: '0'
    offset: '0'
    phase: '0'
    samp_rate: samp_rate
    type: complex
    waveform: analog.GR_COS_WAVE
- name: snk
  id: blocks_null_sink
  parameters:
    affinity: ''
    alias: ''
    bus_structure_sink: '[[0,],]'
    comment: ''
    num_inputs: '1'
    type: complex
    vlen: '1'
connections:
- [src, '0', snk, '0']
metadata:
  file_format: 1
"#;

/// `src -> thr_a -> snk` and `src -> thr_b`, where both throttles share one type.
#[allow(dead_code)]
pub const REPEATED_TYPES_FLOWGRAPH: &str = r#"
blocks:
- name: src
  id: analog_noise_source_x
  parameters:
    amp: '0.5'
    noise_type: analog.GR_GAUSSIAN
    seed: '-42'
    type: float
- name: thr_a
  id: blocks_throttle
  parameters:
    ignoretag: 'True'
    samples_per_second: samp_rate
    type: float
- name: thr_b
  id: blocks_throttle
  parameters:
    ignoretag: 'False'
    samples_per_second: samp_rate
    type: float
- name: snk
  id: blocks_null_sink
  parameters:
    num_inputs: '1'
    type: float
connections:
- [src, '0', thr_a, '0']
- [src, '0', thr_b, '0']
- [thr_a, '0', snk, '0']
"#;

/// A 4diac system file with the network nested three levels deep between siblings.
#[allow(dead_code)]
pub const HOST_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<System Name="RadioProject" Comment="">
  <Identification Standard="61499-2"/>
  <Application Name="RadioProjectApp" Comment="">
    <Before Name="first"/>
    <SubApp Name="Wrapper">
      <SubAppInterfaceList/>
      <SubAppNetwork>
        <FB Name="OLD" Type="OLD_TYPE" x="0" y="0"/>
      </SubAppNetwork>
      <After Name="trailing"/>
    </SubApp>
  </Application>
  <Device Name="FORTE_PC" Type="FORTE_PC"/>
</System>
"#;

#[allow(dead_code)]
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).expect("valid date")
}

#[allow(dead_code)]
pub fn parse(yaml: &str) -> FlowGraph {
    GraphModelBuilder::new().parse_str(yaml).expect("Failed to build flow graph")
}

#[allow(dead_code)]
pub fn convert(yaml: &str) -> ConversionArtifacts {
    Converter::builder(parse(yaml))
        .with_date(fixed_date())
        .build()
        .convert()
        .expect("Failed to convert flow graph")
}

/// Attribute value of `elem`, panicking with a readable message when absent.
#[allow(dead_code)]
pub fn attr<'a>(elem: &'a xmltree::Element, name: &str) -> &'a str {
    elem.attributes
        .get(name)
        .map(String::as_str)
        .unwrap_or_else(|| panic!("<{}> has no attribute '{}'", elem.name, name))
}

/// All direct child elements, skipping text and comments.
#[allow(dead_code)]
pub fn element_children(elem: &xmltree::Element) -> Vec<&xmltree::Element> {
    elem.children
        .iter()
        .filter_map(|node| match node {
            xmltree::XMLNode::Element(child) => Some(child),
            _ => None,
        })
        .collect()
}

#[allow(dead_code)]
pub fn child_names(elem: &xmltree::Element) -> Vec<&str> {
    element_children(elem).into_iter().map(|c| c.name.as_str()).collect()
}

/// Parses a rendered document back into an element tree.
#[allow(dead_code)]
pub fn reparse(document: &str) -> xmltree::Element {
    xmltree::Element::parse(document.as_bytes()).expect("Rendered document is not well-formed")
}
