//! Prelude module for convenient imports
//!
//! Re-exports the types needed to run a conversion end to end.

// Pipeline
pub use crate::converter::{ConversionArtifacts, Converter, ConverterConfig, GeneratedDocument, OutputDirs};
pub use crate::radio::{Block, Connection, FlowGraph, GraphModelBuilder};

// Target model
pub use crate::diac::{
    DocumentPatcher, FunctionBlockNetwork, FunctionBlockType, IecType, InterfaceList, Layout, NetworkAssembler,
    PayloadKind, TypedParameter,
};

// Taxonomy helpers
pub use crate::catalog::{BlockCatalog, CategoryRules};

// Error types
pub use crate::error::{ConversionError, InputError, ModelError, PatchError};
