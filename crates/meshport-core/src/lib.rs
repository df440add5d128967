//! Meshport Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Meshport parser
//! and converter. It includes:
//!
//! - **Mesh**: Node coordinate tuples and element connectivity tuples ([`mesh`] module)
//! - **Document**: The serializable mesh document consumed by the FEM viewer ([`document`] module)

pub mod document;
pub mod mesh;
