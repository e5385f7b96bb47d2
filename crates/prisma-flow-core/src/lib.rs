//! PRISMA Flow Core Types and Definitions
//!
//! This crate provides the foundational drawing types used by the PRISMA flow
//! diagram renderer. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Layered SVG drawables for boxes, labels and connectors ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
