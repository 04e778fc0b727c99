//! Renderers: pure functions from a finished [`Graph`](crate::graph::Graph)
//! to output text. No renderer feeds anything back into the core.

pub mod graphviz;
pub mod json;
