//! Tools
//!
//! This module contains the building blocks of the codec: the bit cursor
//! primitives that pack and unpack the container, and the code tree with
//! its derived lookup tables.

pub mod bit_buffer;
pub mod code_tree;
