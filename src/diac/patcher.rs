use super::network::NETWORK_TAG;
use super::xml::render_document;
use crate::error::PatchError;
use std::fs;
use std::path::Path;
use tracing::info;
use xmltree::{Element, XMLNode};

/// Position of an element in a tree: the child indices leading to its parent,
/// followed by its index among the parent's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLocation {
    pub parent_path: Vec<usize>,
    pub index: usize,
}

/// Depth-first, pre-order search for the first descendant of `root` tagged `tag`.
/// `root` itself is never matched.
pub fn find_descendant(root: &Element, tag: &str) -> Option<NodeLocation> {
    let mut path = Vec::new();
    search(root, tag, &mut path)
}

fn search(parent: &Element, tag: &str, path: &mut Vec<usize>) -> Option<NodeLocation> {
    for (index, node) in parent.children.iter().enumerate() {
        let XMLNode::Element(child) = node else {
            continue;
        };
        if child.name == tag {
            return Some(NodeLocation {
                parent_path: path.clone(),
                index,
            });
        }
        path.push(index);
        if let Some(found) = search(child, tag, path) {
            return Some(found);
        }
        path.pop();
    }
    None
}

/// Replaces the element at `location` with `replacement`, keeping its position among
/// its siblings. Returns the removed element, or `None` if `location` does not point
/// at an element.
pub fn replace_at(root: &mut Element, location: &NodeLocation, replacement: Element) -> Option<Element> {
    let mut parent = root;
    for &index in &location.parent_path {
        parent = match parent.children.get_mut(index) {
            Some(XMLNode::Element(child)) => child,
            _ => return None,
        };
    }
    let slot = parent.children.get_mut(location.index)?;
    if !matches!(slot, XMLNode::Element(_)) {
        return None;
    }
    match std::mem::replace(slot, XMLNode::Element(replacement)) {
        XMLNode::Element(previous) => Some(previous),
        _ => None,
    }
}

/// Splices a freshly generated network into an existing 4diac document.
#[derive(Debug, Clone)]
pub struct DocumentPatcher {
    anchor: String,
}

impl Default for DocumentPatcher {
    fn default() -> Self {
        Self::new(NETWORK_TAG)
    }
}

impl DocumentPatcher {
    pub fn new(anchor: &str) -> Self {
        Self {
            anchor: anchor.to_string(),
        }
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Replaces the first anchor element below `root`, returning the one removed.
    pub fn patch_element(&self, root: &mut Element, replacement: Element) -> Result<Element, PatchError> {
        let not_found = || PatchError::AnchorNotFound {
            tag: self.anchor.clone(),
        };
        let location = find_descendant(root, &self.anchor).ok_or_else(not_found)?;
        replace_at(root, &location, replacement).ok_or_else(not_found)
    }

    /// Patches a host document given as text and returns the re-serialized document.
    pub fn patch_str(&self, host: &str, replacement: &Element) -> Result<String, PatchError> {
        let mut root =
            Element::parse(host.as_bytes()).map_err(|e| PatchError::MalformedHost(e.to_string()))?;
        self.patch_element(&mut root, replacement.clone())?;
        Ok(render_document(&root)?)
    }

    /// Patches the host file in place. The file is left untouched if patching fails.
    pub fn patch_file(&self, path: impl AsRef<Path>, replacement: &Element) -> Result<(), PatchError> {
        let path = path.as_ref();
        let io_error = |source| PatchError::Io {
            path: path.to_path_buf(),
            source,
        };

        let host = fs::read_to_string(path).map_err(io_error)?;
        let patched = self.patch_str(&host, replacement)?;
        fs::write(path, patched).map_err(io_error)?;

        info!(path = %path.display(), anchor = %self.anchor, "Patched host document");
        Ok(())
    }
}
