//! The JSON mesh document consumed by the FEM viewer.
//!
//! [`MeshDocument`] is assembled once from a parsed [`Mesh`] and serialized
//! immediately. Its derived fields are computed at construction:
//!
//! - `types` holds one [`ElementType::Brick`] tag per element.
//! - `nvn` is always [`DOFS_PER_NODE`].
//! - `ngdl` is the node count times `nvn`, i.e. the node count.
//!
//! The sections the viewer accepts but this format never fills (`regions`,
//! `ebc`, `nbc`, `holes`, `fillets`) are typed with [`Unpopulated`], which has
//! no values, so they can only ever serialize as `[]`.
//!
//! # Example
//!
//! ```
//! use meshport_core::{
//!     document::MeshDocument,
//!     mesh::{Element, Mesh, Node},
//! };
//!
//! let mesh = Mesh::new(
//!     vec![Node::new(vec![0.0, 0.0]), Node::new(vec![1.0, 0.0])],
//!     vec![Element::new(vec![0, 1])],
//! );
//! let document = MeshDocument::from_mesh(mesh);
//! assert_eq!(document.total_dofs(), 2);
//! assert_eq!(document.types().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::{Element, Mesh, Node};

/// Degrees of freedom attached to every node in this format.
pub const DOFS_PER_NODE: usize = 1;

/// Element type tags understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// First-order hexahedral brick.
    #[serde(rename = "B1V")]
    Brick,
}

impl ElementType {
    /// Returns the tag written to the document.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementType::Brick => "B1V",
        }
    }
}

/// A document section that is always empty.
///
/// This type has no values; `Vec<Unpopulated>` can only be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unpopulated {}

/// Errors raised when a deserialized document breaks the document invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document has {elements} elements but {types} type tags")]
    TypeCountMismatch { elements: usize, types: usize },

    #[error("document declares nvn = {found}, expected {DOFS_PER_NODE}")]
    DofsPerNode { found: usize },

    #[error("document declares ngdl = {found}, expected {expected}")]
    TotalDofs { found: usize, expected: usize },

    #[error("element {element} references node {index}, but the document has {nodes} nodes")]
    NodeIndexOutOfRange {
        element: usize,
        index: usize,
        nodes: usize,
    },
}

/// The mesh document written as JSON.
///
/// Field order matches the key order the viewer's files use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRepr")]
pub struct MeshDocument {
    nodes: Vec<Node>,
    dictionary: Vec<Element>,
    types: Vec<ElementType>,
    regions: Vec<Unpopulated>,
    ebc: Vec<Unpopulated>,
    nbc: Vec<Unpopulated>,
    nvn: usize,
    ngdl: usize,
    holes: Vec<Unpopulated>,
    fillets: Vec<Unpopulated>,
}

impl MeshDocument {
    /// Assembles the document for a parsed mesh.
    pub fn from_mesh(mesh: Mesh) -> Self {
        let (nodes, dictionary) = mesh.into_parts();
        let types = vec![ElementType::Brick; dictionary.len()];
        let ngdl = nodes.len() * DOFS_PER_NODE;

        Self {
            nodes,
            dictionary,
            types,
            regions: Vec::new(),
            ebc: Vec::new(),
            nbc: Vec::new(),
            nvn: DOFS_PER_NODE,
            ngdl,
            holes: Vec::new(),
            fillets: Vec::new(),
        }
    }

    /// Returns the node coordinate list.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the element connectivity list (0-based node indices).
    pub fn dictionary(&self) -> &[Element] {
        &self.dictionary
    }

    /// Returns the per-element type tags.
    pub fn types(&self) -> &[ElementType] {
        &self.types
    }

    /// Returns the degrees of freedom per node (`nvn`).
    pub fn dofs_per_node(&self) -> usize {
        self.nvn
    }

    /// Returns the total degrees of freedom (`ngdl`).
    pub fn total_dofs(&self) -> usize {
        self.ngdl
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.dictionary.len()
    }
}

/// Wire shape of [`MeshDocument`], checked before it becomes a document.
#[derive(Deserialize)]
struct DocumentRepr {
    nodes: Vec<Node>,
    dictionary: Vec<Element>,
    types: Vec<ElementType>,
    #[serde(default)]
    regions: Vec<Unpopulated>,
    #[serde(default)]
    ebc: Vec<Unpopulated>,
    #[serde(default)]
    nbc: Vec<Unpopulated>,
    nvn: usize,
    ngdl: usize,
    #[serde(default)]
    holes: Vec<Unpopulated>,
    #[serde(default)]
    fillets: Vec<Unpopulated>,
}

impl TryFrom<DocumentRepr> for MeshDocument {
    type Error = DocumentError;

    fn try_from(repr: DocumentRepr) -> Result<Self, Self::Error> {
        if repr.types.len() != repr.dictionary.len() {
            return Err(DocumentError::TypeCountMismatch {
                elements: repr.dictionary.len(),
                types: repr.types.len(),
            });
        }
        if repr.nvn != DOFS_PER_NODE {
            return Err(DocumentError::DofsPerNode { found: repr.nvn });
        }
        let expected = repr.nodes.len() * DOFS_PER_NODE;
        if repr.ngdl != expected {
            return Err(DocumentError::TotalDofs {
                found: repr.ngdl,
                expected,
            });
        }

        let nodes = repr.nodes.len();
        for (element, connectivity) in repr.dictionary.iter().enumerate() {
            if let Some(&index) = connectivity.node_indices().iter().find(|&&i| i >= nodes) {
                return Err(DocumentError::NodeIndexOutOfRange {
                    element,
                    index,
                    nodes,
                });
            }
        }

        Ok(Self {
            nodes: repr.nodes,
            dictionary: repr.dictionary,
            types: repr.types,
            regions: repr.regions,
            ebc: repr.ebc,
            nbc: repr.nbc,
            nvn: repr.nvn,
            ngdl: repr.ngdl,
            holes: repr.holes,
            fillets: repr.fillets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> Mesh {
        Mesh::new(
            vec![
                Node::new(vec![0.0, 0.0]),
                Node::new(vec![1.0, 0.0]),
                Node::new(vec![0.0, 1.0]),
            ],
            vec![Element::new(vec![0, 1, 2])],
        )
    }

    #[test]
    fn test_element_type_tag() {
        assert_eq!(ElementType::Brick.tag(), "B1V");
        assert_eq!(
            serde_json::to_string(&ElementType::Brick).unwrap(),
            "\"B1V\""
        );
    }

    #[test]
    fn test_from_mesh_derived_fields() {
        let document = MeshDocument::from_mesh(triangle_mesh());

        assert_eq!(document.node_count(), 3);
        assert_eq!(document.element_count(), 1);
        assert_eq!(document.types(), &[ElementType::Brick]);
        assert_eq!(document.dofs_per_node(), 1);
        assert_eq!(document.total_dofs(), 3);
    }

    #[test]
    fn test_serialized_layout() {
        let document = MeshDocument::from_mesh(triangle_mesh());
        let json = serde_json::to_string(&document).unwrap();

        assert_eq!(
            json,
            concat!(
                r#"{"nodes":[[0.0,0.0],[1.0,0.0],[0.0,1.0]],"#,
                r#""dictionary":[[0,1,2]],"types":["B1V"],"#,
                r#""regions":[],"ebc":[],"nbc":[],"nvn":1,"ngdl":3,"#,
                r#""holes":[],"fillets":[]}"#
            )
        );
    }

    #[test]
    fn test_empty_mesh() {
        let document = MeshDocument::from_mesh(Mesh::default());
        let json = serde_json::to_string(&document).unwrap();

        assert!(json.contains(r#""dictionary":[]"#));
        assert!(json.contains(r#""types":[]"#));
        assert!(json.contains(r#""ngdl":0"#));
    }

    #[test]
    fn test_deserialize_roundtrip() {
        let document = MeshDocument::from_mesh(triangle_mesh());
        let json = serde_json::to_string(&document).unwrap();
        let reread: MeshDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(reread, document);
    }

    #[test]
    fn test_deserialize_rejects_type_count_mismatch() {
        let json = r#"{"nodes":[[0.0]],"dictionary":[[0]],"types":[],
            "nvn":1,"ngdl":1}"#;
        let err = serde_json::from_str::<MeshDocument>(json).unwrap_err();
        assert!(err.to_string().contains("1 elements but 0 type tags"));
    }

    #[test]
    fn test_deserialize_rejects_wrong_ngdl() {
        let json = r#"{"nodes":[[0.0],[1.0]],"dictionary":[],"types":[],
            "nvn":1,"ngdl":5}"#;
        let err = serde_json::from_str::<MeshDocument>(json).unwrap_err();
        assert!(err.to_string().contains("ngdl = 5"));
    }

    #[test]
    fn test_deserialize_rejects_dangling_index() {
        let json = r#"{"nodes":[[0.0]],"dictionary":[[0,3]],"types":["B1V"],
            "nvn":1,"ngdl":1}"#;
        let err = serde_json::from_str::<MeshDocument>(json).unwrap_err();
        assert!(err.to_string().contains("references node 3"));
    }

    #[test]
    fn test_deserialize_rejects_populated_section() {
        let json = r#"{"nodes":[],"dictionary":[],"types":[],
            "regions":[1],"nvn":1,"ngdl":0}"#;
        assert!(serde_json::from_str::<MeshDocument>(json).is_err());
    }
}
