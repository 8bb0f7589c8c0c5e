use crate::diac::xml::render_document;
use crate::diac::{
    AdapterType, COMPLEX_TYPE_FILE, DEFAULT_AUTHOR, DEFAULT_PACKAGE, FB_STANDARD, FunctionBlockNetwork,
    FunctionBlockType, Layout, MetaData, NETWORK_FILE, NameCounters, NetworkAssembler, PayloadKind,
    complex_data_type, file_name_for, type_name_for,
};
use crate::error::RenderError;
use crate::radio::{Block, FlowGraph};
use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use indexmap::map::Entry;
use itertools::Itertools;
use tracing::{debug, info, warn};
use xmltree::Element;

mod artifact;

pub use artifact::OutputDirs;

/// A rendered XML document and the file name it is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub content: String,
}

impl GeneratedDocument {
    fn render(file_name: impl Into<String>, root: &Element) -> Result<Self, RenderError> {
        Ok(Self {
            file_name: file_name.into(),
            content: render_document(root)?,
        })
    }
}

/// Everything produced by one conversion run.
#[derive(Debug, Clone)]
pub struct ConversionArtifacts {
    /// One `.fbt` document per distinct block id, in first-use order.
    pub function_blocks: Vec<GeneratedDocument>,
    /// Name of the type behind each entry of `function_blocks`.
    pub type_names: Vec<String>,
    pub complex_type: GeneratedDocument,
    /// One `.adp` document per payload kind referenced by a socket or plug.
    pub adapters: Vec<GeneratedDocument>,
    pub network: FunctionBlockNetwork,
    pub network_document: GeneratedDocument,
}

impl ConversionArtifacts {
    /// The network subtree to splice into a host document.
    pub fn network_element(&self) -> Element {
        self.network.to_element()
    }
}

/// Settings shared by every emitted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub package: String,
    pub author: String,
    pub date: NaiveDate,
    pub layout: Layout,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            date: Local::now().date_naive(),
            layout: Layout::default(),
        }
    }
}

pub struct ConverterBuilder {
    graph: FlowGraph,
    config: ConverterConfig,
}

impl ConverterBuilder {
    pub fn new(graph: FlowGraph) -> Self {
        Self {
            graph,
            config: ConverterConfig::default(),
        }
    }

    pub fn with_package(mut self, package: &str) -> Self {
        self.config.package = package.to_string();
        self
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.config.author = author.to_string();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.config.date = date;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn build(self) -> Converter {
        Converter {
            graph: self.graph,
            config: self.config,
        }
    }
}

/// Translates a flow graph model into 4diac documents.
pub struct Converter {
    graph: FlowGraph,
    config: ConverterConfig,
}

impl Converter {
    pub fn builder(graph: FlowGraph) -> ConverterBuilder {
        ConverterBuilder::new(graph)
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn meta_data(&self) -> MetaData {
        MetaData::new(
            FB_STANDARD,
            &self.config.author,
            self.config.date,
            &self.config.package,
        )
    }

    /// One template block per function block type, in first-use order. Blocks sharing
    /// an id share a type, so the template carries the union of their ports.
    pub fn type_templates(&self) -> IndexMap<String, Block> {
        let mut templates: IndexMap<String, Block> = IndexMap::new();
        for block in &self.graph.blocks {
            match templates.entry(type_name_for(&block.id)) {
                Entry::Occupied(mut entry) => {
                    if block.block_type.is_some() && entry.get().block_type != block.block_type {
                        warn!(
                            block = %block.name,
                            fb_type = %entry.key(),
                            "Item type differs from the first block of this type, keeping the first"
                        );
                    }
                    entry.get_mut().merge_ports(block);
                }
                Entry::Vacant(entry) => {
                    entry.insert(block.clone());
                }
            }
        }
        templates
    }

    /// Payload kinds referenced by at least one socket or plug, in a stable order.
    pub fn used_payload_kinds(&self) -> Vec<PayloadKind> {
        self.type_templates()
            .values()
            .filter(|b| b.has_inputs || b.has_outputs)
            .map(|b| PayloadKind::from_block_type(b.block_type.as_deref()))
            .unique()
            .sorted()
            .collect()
    }

    pub fn convert(&self) -> Result<ConversionArtifacts, RenderError> {
        let meta_data = self.meta_data();

        let templates = self.type_templates();
        info!(
            blocks = self.graph.blocks.len(),
            types = templates.len(),
            "Generating function block types"
        );
        let mut function_blocks = Vec::with_capacity(templates.len());
        let mut type_names = Vec::with_capacity(templates.len());
        for block in templates.values() {
            let fb_type = FunctionBlockType::from_block(block, &meta_data);
            debug!(
                block = %block.name,
                fb_type = %fb_type.name,
                inputs = fb_type.interface.input_vars.len(),
                "Synthesized interface"
            );
            function_blocks.push(GeneratedDocument::render(
                file_name_for(&block.id),
                &fb_type.to_element(),
            )?);
            type_names.push(fb_type.name);
        }

        info!("Generating shared types and adapters");
        let complex_type = GeneratedDocument::render(COMPLEX_TYPE_FILE, &complex_data_type(&meta_data))?;
        let adapters = self
            .used_payload_kinds()
            .into_iter()
            .map(|kind| {
                let adapter = AdapterType::generic(kind, &meta_data);
                GeneratedDocument::render(adapter.file_name(), &adapter.to_element())
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("Assembling function block network");
        let assembler = NetworkAssembler::new(self.config.layout, &self.config.package);
        let mut counters = NameCounters::new();
        let network = assembler.assemble(&self.graph.blocks, &type_names, &mut counters);
        let network_document = GeneratedDocument::render(NETWORK_FILE, &network.to_element())?;

        info!(
            instances = network.instances.len(),
            connections = network.adapter_connections.len(),
            adapters = adapters.len(),
            "Conversion finished"
        );

        Ok(ConversionArtifacts {
            function_blocks,
            type_names,
            complex_type,
            adapters,
            network,
            network_document,
        })
    }
}
