//! # radio2diac - GNU Radio to Eclipse 4diac translation
//!
//! **radio2diac** turns a GNU Radio Companion flow graph (`.grc`) into an equivalent
//! IEC 61499 application for the Eclipse 4diac IDE: one basic function block type per
//! GNU Radio block, the shared adapter and data types they reference, and a function
//! block network wired like the original flow graph.
//!
//! ## Core Workflow
//!
//! 1.  **Build the Model**: [`GraphModelBuilder`](radio::GraphModelBuilder) parses the
//!     flow graph, infers which blocks consume and produce samples, broadcasts the
//!     global sample rate and drops GRC-only parameters.
//! 2.  **Configure**: [`Converter::builder`](converter::Converter::builder) takes the model
//!     plus the package, author, date and layout to stamp into every document.
//! 3.  **Convert**: [`Converter::convert`](converter::Converter::convert) classifies every
//!     parameter into an IEC type, synthesizes each block's interface, renders the type
//!     documents and assembles the network.
//! 4.  **Write and Patch**: write the artifacts with
//!     [`ConversionArtifacts::write`](converter::ConversionArtifacts::write) and splice
//!     the network into an existing 4diac system file with
//!     [`DocumentPatcher`](diac::DocumentPatcher).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use radio2diac::prelude::*;
//!
//! fn main() -> Result<(), ConversionError> {
//!     let graph = GraphModelBuilder::new().parse_file("flowgraph.grc")?;
//!     let artifacts = Converter::builder(graph).with_package("gnu_radio").build().convert()?;
//!
//!     artifacts.write(&OutputDirs {
//!         blocks: "out/blocks".into(),
//!         network: "out".into(),
//!         types: "out/types".into(),
//!     })?;
//!     DocumentPatcher::default().patch_file("MyProject.sys", &artifacts.network_element())?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod converter;
pub mod diac;
pub mod error;
pub mod prelude;
pub mod radio;
