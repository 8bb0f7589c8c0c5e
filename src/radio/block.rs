use ahash::AHashSet;
use indexmap::IndexMap;

/// A directed stream connection between two blocks, identified by block name.
///
/// A connection always lives in the `connections` list of the block named by `src`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub src: String,
    pub dst: String,
}

impl Connection {
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }
}

/// A processing block of a GNU Radio flow graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Instance name, unique within one flow graph.
    pub name: String,
    /// GRC template identifier, e.g. `analog_sig_source_x`.
    pub id: String,
    /// Item type promoted from the `type` parameter (`complex`, `float`, ...).
    pub block_type: Option<String>,
    /// Parameter name -> raw textual value, in file order.
    pub parameters: IndexMap<String, String>,
    /// Outgoing connections, in file order.
    pub connections: Vec<Connection>,
    pub has_inputs: bool,
    pub has_outputs: bool,
}

impl Block {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Overwrites `key` only if the block already declares it.
    pub fn replace_parameter(&mut self, key: &str, value: &str) -> bool {
        match self.parameters.get_mut(key) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Widens this block's ports and parameter keys with those of `other`. Values
    /// already present, and the item type if set, are kept.
    pub fn merge_ports(&mut self, other: &Block) {
        self.has_inputs |= other.has_inputs;
        self.has_outputs |= other.has_outputs;
        for (key, value) in &other.parameters {
            if !self.parameters.contains_key(key) {
                self.parameters.insert(key.clone(), value.clone());
            }
        }
        if self.block_type.is_none() {
            self.block_type = other.block_type.clone();
        }
    }
}

/// The in-memory graph model of one flow graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowGraph {
    pub blocks: Vec<Block>,
}

impl FlowGraph {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Iterates over every connection of every block, in block order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.blocks.iter().flat_map(|b| b.connections.iter())
    }

    /// Marks every block that feeds or is fed by another block.
    ///
    /// The scan covers the connection lists of all blocks: a block's `has_inputs`
    /// depends on connections owned by its upstream neighbours.
    pub fn analyze_directionality(&mut self) {
        let mut sources: AHashSet<String> = AHashSet::new();
        let mut destinations: AHashSet<String> = AHashSet::new();
        for connection in self.connections() {
            sources.insert(connection.src.clone());
            destinations.insert(connection.dst.clone());
        }

        for block in &mut self.blocks {
            block.has_outputs = sources.contains(&block.name);
            block.has_inputs = destinations.contains(&block.name);
        }
    }
}
