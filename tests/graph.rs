//! Tests for building the flow graph model from GRC documents.
mod common;
use common::*;
use radio2diac::error::{ConversionError, InputError, ModelError};
use radio2diac::prelude::*;

#[test]
fn test_directionality_follows_connections() {
    let graph = parse(SIMPLE_FLOWGRAPH);

    let src = graph.block("src").expect("src block");
    let snk = graph.block("snk").expect("snk block");
    assert!(src.has_outputs);
    assert!(!src.has_inputs);
    assert!(snk.has_inputs);
    assert!(!snk.has_outputs);
}

#[test]
fn test_inputs_are_inferred_from_other_blocks_connections() {
    let graph = parse(REPEATED_TYPES_FLOWGRAPH);

    // thr_a owns no connection into itself; its input comes from src's list.
    let thr_a = graph.block("thr_a").unwrap();
    assert!(thr_a.has_inputs);
    assert!(thr_a.has_outputs);

    let thr_b = graph.block("thr_b").unwrap();
    assert!(thr_b.has_inputs);
    assert!(!thr_b.has_outputs);
}

#[test]
fn test_unconnected_block_has_no_ports() {
    let yaml = r#"
blocks:
- name: lonely
  id: blocks_probe_rate
  parameters:
    alpha: '0.15'
connections: []
"#;
    let graph = parse(yaml);
    let lonely = graph.block("lonely").unwrap();
    assert!(!lonely.has_inputs);
    assert!(!lonely.has_outputs);
}

#[test]
fn test_connections_live_with_their_source_block() {
    let graph = parse(REPEATED_TYPES_FLOWGRAPH);

    for block in &graph.blocks {
        for connection in &block.connections {
            assert_eq!(connection.src, block.name);
        }
    }
    let src = graph.block("src").unwrap();
    assert_eq!(
        src.connections,
        vec![Connection::new("src", "thr_a"), Connection::new("src", "thr_b")]
    );
    assert_eq!(graph.connections().count(), 3);
}

#[test]
fn test_sample_rate_block_is_removed_and_broadcast() {
    let graph = parse(SIMPLE_FLOWGRAPH);

    assert!(graph.block("samp_rate").is_none());
    assert_eq!(graph.blocks.len(), 2);
    let src = graph.block("src").unwrap();
    assert_eq!(src.parameters.get("samp_rate").map(String::as_str), Some("32e3"));
    // The sink never declared a sample rate and must not gain one.
    assert!(!graph.block("snk").unwrap().parameters.contains_key("samp_rate"));
}

#[test]
fn test_sample_rate_reaches_sample_rate_parameter() {
    let yaml = r#"
blocks:
- name: samp_rate
  id: variable
  parameters:
    value: '48000'
- name: audio
  id: audio_sink
  parameters:
    sample_rate: '44100'
connections: []
"#;
    let graph = parse(yaml);
    let audio = graph.block("audio").unwrap();
    assert_eq!(audio.parameters["sample_rate"], "48000");
}

#[test]
fn test_advanced_parameters_are_stripped_and_type_promoted() {
    let graph = parse(SIMPLE_FLOWGRAPH);
    let src = graph.block("src").unwrap();

    assert_eq!(src.block_type.as_deref(), Some("complex"));
    let keys: Vec<&str> = src.parameters.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["amp", "freq", "offset", "phase", "samp_rate", "waveform"]
    );
}

#[test]
fn test_dangling_connection_is_dropped_by_default() {
    let yaml = r#"
blocks:
- name: snk
  id: blocks_null_sink
  parameters: {}
connections:
- [ghost, '0', snk, '0']
"#;
    let graph = parse(yaml);
    assert_eq!(graph.connections().count(), 0);
    assert!(!graph.block("snk").unwrap().has_inputs);
}

#[test]
fn test_dangling_connection_fails_in_strict_mode() {
    let yaml = r#"
blocks:
- name: snk
  id: blocks_null_sink
  parameters: {}
connections:
- [ghost, '0', snk, '0']
"#;
    let result = GraphModelBuilder::new().strict(true).parse_str(yaml);

    match result {
        Err(ConversionError::Model(ModelError::DanglingConnection {
            source_block,
            destination,
        })) => {
            assert_eq!(source_block, "ghost");
            assert_eq!(destination, "snk");
        }
        other => panic!("Expected DanglingConnection, got {:?}", other),
    }
}

#[test]
fn test_non_string_scalars_are_kept_as_text() {
    let yaml = r#"
blocks:
- name: blk
  id: some_block
  parameters:
    count: 32000
    gain: 1.5
    enabled: true
    note:
connections: []
"#;
    let graph = parse(yaml);
    let params = &graph.block("blk").unwrap().parameters;
    assert_eq!(params["count"], "32000");
    assert_eq!(params["gain"], "1.5");
    assert_eq!(params["enabled"], "True");
    assert_eq!(params["note"], "");
}

#[test]
fn test_malformed_document_fails() {
    let result = GraphModelBuilder::new().parse_str("blocks: [unclosed");
    assert!(matches!(result, Err(ConversionError::Input(InputError::Yaml(_)))));
}

#[test]
fn test_block_without_id_fails() {
    let yaml = r#"
blocks:
- name: blk
  parameters: {}
connections: []
"#;
    let result = GraphModelBuilder::new().parse_str(yaml);
    assert!(matches!(result, Err(ConversionError::Input(InputError::Yaml(_)))));
}

#[test]
fn test_sample_rate_block_without_value_fails() {
    let yaml = r#"
blocks:
- name: samp_rate
  id: variable
  parameters: {}
connections: []
"#;
    match GraphModelBuilder::new().parse_str(yaml) {
        Err(ConversionError::Input(InputError::MissingField { block, .. })) => {
            assert_eq!(block, "samp_rate");
        }
        other => panic!("Expected MissingField, got {:?}", other),
    }
}

#[test]
fn test_missing_file_fails() {
    let result = GraphModelBuilder::new().parse_file("/definitely/not/here.grc");
    match result {
        Err(ConversionError::Input(InputError::Io { path, .. })) => {
            assert!(path.ends_with("here.grc"));
        }
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_block_without_parameters_fails() {
    let yaml = r#"
blocks:
- name: blk
  id: some_block
connections: []
"#;
    let result = GraphModelBuilder::new().parse_str(yaml);
    assert!(matches!(result, Err(ConversionError::Input(InputError::Yaml(_)))));
}

#[test]
fn test_flow_graph_without_connections_fails() {
    let yaml = r#"
blocks:
- name: blk
  id: some_block
  parameters: {}
"#;
    let result = GraphModelBuilder::new().parse_str(yaml);
    assert!(matches!(result, Err(ConversionError::Input(InputError::Yaml(_)))));
}

#[test]
fn test_last_sample_rate_block_wins() {
    let yaml = r#"
blocks:
- name: samp_rate
  id: variable
  parameters:
    value: '1000'
- name: src
  id: analog_sig_source_x
  parameters:
    samp_rate: samp_rate
- name: samp_rate
  id: variable
  parameters:
    value: '2000'
connections: []
"#;
    let graph = parse(yaml);

    assert_eq!(graph.blocks.len(), 1);
    assert_eq!(graph.block("src").unwrap().parameters["samp_rate"], "2000");
}
