use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a GNU Radio flow graph into the graph model.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read flow graph '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse flow graph YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Block '{block}' is missing the required field '{field}'")]
    MissingField { block: String, field: String },
}

/// Errors raised by the graph model when its connection set is inconsistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error(
        "Connection '{source_block} -> {destination}' references source block '{source_block}', which is not in the flow graph"
    )]
    DanglingConnection {
        source_block: String,
        destination: String,
    },
}

/// Errors that can occur while serializing an element tree to XML text.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    #[error("Failed to serialize <{element}>: {message}")]
    Serialize { element: String, message: String },

    #[error("Serializer produced invalid UTF-8 for <{0}>")]
    Encoding(String),
}

/// Errors that can occur while splicing a network into a host 4diac document.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("No <{tag}> element found in the host document")]
    AnchorNotFound { tag: String },

    #[error("Host document is not well-formed XML: {0}")]
    MalformedHost(String),

    #[error("Failed to access host document '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors that can occur while writing generated documents to disk.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while reading block catalogs and category rules.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse category rules: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure of the end-to-end conversion pipeline.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
