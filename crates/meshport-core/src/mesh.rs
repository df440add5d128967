//! Node and element types produced by the parser.
//!
//! A [`Mesh`] is the raw result of reading a source file: an ordered list of
//! [`Node`] coordinate tuples and an ordered list of [`Element`] connectivity
//! tuples. Node identity is positional, so the node at index `i` is the node
//! referenced by connectivity index `i`.

use serde::{Deserialize, Serialize};

/// A mesh vertex, stored as its coordinate tuple.
///
/// Serializes as a plain JSON array of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(Vec<f64>);

impl Node {
    /// Creates a node from its coordinates.
    pub fn new(coords: Vec<f64>) -> Self {
        Self(coords)
    }

    /// Returns the coordinate values.
    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    /// Returns the number of coordinates (the spatial dimension of this node).
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<f64>> for Node {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

/// A mesh primitive, stored as the ordered 0-based indices of its nodes.
///
/// Serializes as a plain JSON array of integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element(Vec<usize>);

impl Element {
    /// Creates an element from 0-based node indices.
    pub fn new(node_indices: Vec<usize>) -> Self {
        Self(node_indices)
    }

    /// Returns the 0-based node indices.
    pub fn node_indices(&self) -> &[usize] {
        &self.0
    }

    /// Returns the number of nodes this element connects.
    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<usize>> for Element {
    fn from(node_indices: Vec<usize>) -> Self {
        Self::new(node_indices)
    }
}

/// Parsed node and element lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    nodes: Vec<Node>,
    elements: Vec<Element>,
}

impl Mesh {
    /// Creates a mesh from its node and element lists.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Node coordinate tuples, in source order.
    /// * `elements` - Element connectivity tuples using 0-based node indices.
    pub fn new(nodes: Vec<Node>, elements: Vec<Element>) -> Self {
        Self { nodes, elements }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Consumes the mesh, returning its node and element lists.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Element>) {
        (self.nodes, self.elements)
    }
}
