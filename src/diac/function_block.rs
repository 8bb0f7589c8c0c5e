use super::interface::{InterfaceList, synthesize_interface};
use super::types::{PayloadKind, infer_types};
use super::xml::{element, push_child};
use crate::radio::Block;
use chrono::NaiveDate;
use xmltree::Element;

/// Standard tag for function block and data types.
pub const FB_STANDARD: &str = "61499-2";
/// Standard tag for adapter types.
pub const ADAPTER_STANDARD: &str = "61499-1";
pub const TYPE_VERSION: &str = "1.0";
pub const DEFAULT_AUTHOR: &str = "radio2diac";
pub const DEFAULT_PACKAGE: &str = "gnu_radio";

/// Identification, version and compiler information written at the top of every
/// generated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaData {
    pub standard: String,
    pub version: String,
    pub author: String,
    pub date: NaiveDate,
    pub package_name: String,
}

impl MetaData {
    pub fn new(standard: &str, author: &str, date: NaiveDate, package_name: &str) -> Self {
        Self {
            standard: standard.to_string(),
            version: TYPE_VERSION.to_string(),
            author: author.to_string(),
            date,
            package_name: package_name.to_string(),
        }
    }

    /// Same metadata under a different standard tag.
    pub fn for_standard(&self, standard: &str) -> Self {
        Self {
            standard: standard.to_string(),
            ..self.clone()
        }
    }

    pub fn append_to(&self, parent: &mut Element) {
        let date = self.date.format("%Y-%m-%d").to_string();
        push_child(parent, element("Identification", &[("Standard", &self.standard)]));
        push_child(
            parent,
            element(
                "VersionInfo",
                &[("Version", &self.version), ("Author", &self.author), ("Date", &date)],
            ),
        );
        push_child(parent, element("CompilerInfo", &[("packageName", &self.package_name)]));
    }
}

/// A generated basic function block type for one GNU Radio block.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBlockType {
    pub name: String,
    pub comment: Option<String>,
    pub meta_data: MetaData,
    pub interface: InterfaceList,
}

impl FunctionBlockType {
    /// Derives the type from a block: name is the upper-cased GRC id, interface is
    /// synthesized from the block's typed parameters and directionality.
    pub fn from_block(block: &Block, meta_data: &MetaData) -> Self {
        let parameters = infer_types(&block.parameters);
        let payload = PayloadKind::from_block_type(block.block_type.as_deref());
        let interface = synthesize_interface(
            &parameters,
            block.has_inputs,
            block.has_outputs,
            payload,
            &meta_data.package_name,
        );

        Self {
            name: type_name_for(&block.id),
            comment: None,
            meta_data: meta_data.clone(),
            interface,
        }
    }

    pub fn comment(&self) -> String {
        self.comment
            .clone()
            .unwrap_or_else(|| format!("This is a generated function block of type {}", self.name))
    }

    /// Renders the `<FBType>` root, closing with a single-state ECC placeholder.
    pub fn to_element(&self) -> Element {
        let comment = self.comment();
        let mut fb = element("FBType", &[("Name", &self.name), ("Comment", &comment)]);
        self.meta_data.append_to(&mut fb);
        push_child(&mut fb, self.interface.to_element());

        let mut ecc = element("ECC", &[]);
        push_child(
            &mut ecc,
            element(
                "ECState",
                &[("Name", "START"), ("Comment", "Initial State"), ("x", "475"), ("y", "1125")],
            ),
        );
        let mut basic_fb = element("BasicFB", &[]);
        push_child(&mut basic_fb, ecc);
        push_child(&mut fb, basic_fb);

        fb
    }
}

/// Function block type name for a GRC block id.
pub fn type_name_for(block_id: &str) -> String {
    block_id.to_uppercase()
}

/// File name of the generated type for a GRC block id.
pub fn file_name_for(block_id: &str) -> String {
    format!("fb_{}_gen.fbt", block_id)
}
