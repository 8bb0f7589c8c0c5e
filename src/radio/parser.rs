use super::block::{Block, Connection, FlowGraph};
use super::raw::{RawFlowGraph, scalar_text};
use crate::error::{ConversionError, InputError, ModelError};
use ahash::AHashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the GRC variable block that carries the global sample rate.
pub const SAMPLE_RATE_BLOCK: &str = "samp_rate";

/// Parameters that receive the global sample rate when a block declares them.
pub const SAMPLE_RATE_PARAMETERS: [&str; 2] = ["samp_rate", "sample_rate"];

/// Parameters from GRC's "Advanced" tab; they have no counterpart in 4diac.
pub const ADVANCED_PARAMETERS: [&str; 5] =
    ["alias", "affinity", "minoutbuf", "maxoutbuf", "comment"];

/// Builds a [`FlowGraph`] from a GNU Radio Companion document.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphModelBuilder {
    strict: bool,
}

impl GraphModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode a connection whose source block does not exist fails the build
    /// instead of being dropped.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<FlowGraph, ConversionError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Reading GNU Radio flow graph");
        let content = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&content)
    }

    pub fn parse_str(&self, yaml: &str) -> Result<FlowGraph, ConversionError> {
        let raw: RawFlowGraph = serde_yaml::from_str(yaml).map_err(InputError::from)?;
        self.build(raw)
    }

    /// Converts the raw document into the graph model and runs every model pass.
    pub fn build(&self, raw: RawFlowGraph) -> Result<FlowGraph, ConversionError> {
        let mut blocks = Vec::with_capacity(raw.blocks.len());
        let mut sample_rate: Option<String> = None;

        for raw_block in raw.blocks {
            if raw_block.name == SAMPLE_RATE_BLOCK {
                let value = raw_block.parameters.get("value").ok_or_else(|| {
                    InputError::MissingField {
                        block: raw_block.name.clone(),
                        field: "parameters.value".to_string(),
                    }
                })?;
                sample_rate = Some(scalar_text(value));
                continue;
            }

            let mut block = Block::new(raw_block.name, raw_block.id);
            for (key, value) in &raw_block.parameters {
                block.parameters.insert(key.clone(), scalar_text(value));
            }
            blocks.push(block);
        }

        let mut index_by_name: AHashMap<String, usize> = AHashMap::new();
        for (index, block) in blocks.iter().enumerate() {
            index_by_name.entry(block.name.clone()).or_insert(index);
        }

        for raw_connection in &raw.connections {
            let connection =
                Connection::new(raw_connection.source(), raw_connection.destination());
            match index_by_name.get(&connection.src) {
                Some(&index) => blocks[index].add_connection(connection),
                None if self.strict => {
                    return Err(ModelError::DanglingConnection {
                        source_block: connection.src,
                        destination: connection.dst,
                    }
                    .into());
                }
                None => warn!(
                    src = %connection.src,
                    dst = %connection.dst,
                    "Dropping connection from unknown block"
                ),
            }
        }

        let mut graph = FlowGraph::new(blocks);
        graph.analyze_directionality();
        promote_block_types(&mut graph);
        if let Some(rate) = &sample_rate {
            broadcast_sample_rate(&mut graph, rate);
        }
        strip_advanced_parameters(&mut graph);

        info!(
            blocks = graph.blocks.len(),
            connections = graph.connections().count(),
            "Flow graph model built"
        );
        Ok(graph)
    }
}

/// Moves a `type` parameter into [`Block::block_type`].
pub fn promote_block_types(graph: &mut FlowGraph) {
    for block in &mut graph.blocks {
        if let Some(item_type) = block.parameters.shift_remove("type") {
            debug!(block = %block.name, item_type = %item_type, "Promoted block type");
            block.block_type = Some(item_type);
        }
    }
}

/// Overwrites every declared sample-rate parameter with the global value.
pub fn broadcast_sample_rate(graph: &mut FlowGraph, rate: &str) {
    for block in &mut graph.blocks {
        for key in SAMPLE_RATE_PARAMETERS {
            block.replace_parameter(key, rate);
        }
    }
}

pub fn strip_advanced_parameters(graph: &mut FlowGraph) {
    for block in &mut graph.blocks {
        for key in ADVANCED_PARAMETERS {
            block.parameters.shift_remove(key);
        }
    }
}
