//! # Huffpack Library
//!
//! Compress or expand byte streams with static Huffman coding
//! * `static_huff` transforms an in-memory byte buffer into a self-describing
//!   container (header + codebook + bit-packed payload) and back
//! * the container embeds everything the decoder needs, there is no
//!   out-of-band state
//!
//! The functions operate on buffers, not files (we expect files that are
//! easily buffered).  The 6 byte header is always little endian.
//!
//! ## Buffer Example
//!
//! ```rs
//! use huffpack::*;
//! let test_data = "This is the chaunt of the priests.  The chaunt of the priests of Mung.".as_bytes();
//! let compressed = static_huff::compress(test_data).expect("compression failed");
//! let expanded = static_huff::expand(&compressed).expect("expansion failed");
//! assert_eq!(test_data.to_vec(),expanded);
//! ```

mod tools;
pub mod static_huff;

/// Codec Errors
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("memory allocation failed")]
    AllocationFailed,
    #[error("input cannot be coded")]
    BadInput,
    #[error("output buffer too small")]
    BufferTooSmall
}
