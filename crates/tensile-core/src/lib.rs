//! Tensile Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Tensile layout
//! engine and its front-ends. It includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::NodeId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
