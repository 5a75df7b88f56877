#![doc = include_str!("../README.md")]

mod arena;
mod html;

pub use arena::{Attribute, NodeData, NodeId, RenderNode, RenderTree};
