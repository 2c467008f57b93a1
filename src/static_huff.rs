//! Static Huffman Codec
//!
//! This encodes a byte buffer into a self-describing container and decodes
//! it back.  The container is laid out as follows:
//!
//! * bytes 0..3: decompressed length (u32, little endian)
//! * bytes 4..5: codebook bit length (u16, little endian)
//! * from bit 48: one codebook entry per distinct byte, followed by the
//!   payload bits and zero padding to the next byte boundary
//! * one reserved zero byte at the end, so the decoder's 3 byte lookahead
//!   stays in bounds
//!
//! A codebook entry is an 8 bit symbol, an 8 bit code length (a stored 0
//! stands for 16, the longest legal code), and the code word itself.
//! Everything past the fixed header is packed LSB-first through the bit
//! cursor primitives, so the decoder can read a 16 bit window and resolve
//! the next symbol with a single lookup in a direct-addressed table.
//!
//! * This transforms buffers, not files (we expect files that are easily buffered)
//! * Decoding does not validate the container; corrupt input yields
//!   garbage bytes, but never a panic

use crate::tools::bit_buffer;
use crate::tools::code_tree::{self,DecodingTable,ALPHABET,MAX_CODE_LEN};
use crate::Error;

/// size of the fixed header in bytes
const HEADER_BASE_SIZE: usize = 6;
/// bit position where the serialized codebook starts
const CODEBOOK_START: usize = HEADER_BASE_SIZE << 3;

/// Tally byte occurrences over the input.  An input with a single distinct
/// byte would get a zero-bit code from the tree, so the count of an
/// adjacent symbol is bumped to force a two leaf tree and a 1 bit code.
fn frequency_census(input: &[u8]) -> Result<[usize;ALPHABET],Error> {
    let mut freq = [0;ALPHABET];
    for &byte in input {
        freq[byte as usize] += 1;
    }
    let distinct = freq.iter().filter(|&&f| f > 0).count();
    match distinct {
        0 => Err(Error::BadInput),
        1 => {
            if let Some(i) = freq.iter().position(|&f| f > 0) {
                freq[if i > 0 { i - 1 } else { i + 1 }] += 1;
            }
            Ok(freq)
        },
        _ => Ok(freq)
    }
}

/// Main compression function.
/// Returns the container, which stores the codebook ahead of the payload,
/// so expansion needs nothing but the container itself.
pub fn compress(input: &[u8]) -> Result<Vec<u8>,Error> {
    if input.len() > u32::MAX as usize {
        return Err(Error::BadInput);
    }
    let freq = frequency_census(input)?;
    let tree = code_tree::build(&freq)?;
    let table = code_tree::encoding_table(&tree)?;

    let mut codebook_bits: usize = 0;
    for entry in table.iter() {
        if entry.len > 0 {
            codebook_bits += 16 + entry.len as usize;
        }
    }
    // the census may have bumped a byte that never occurs, so the payload
    // size comes from the input, not the frequency table
    let mut payload_bits: usize = 0;
    for &byte in input {
        payload_bits += table[byte as usize].len as usize;
    }
    let total = HEADER_BASE_SIZE + ((codebook_bits + payload_bits + 7) >> 3) + 1;

    let mut output: Vec<u8> = Vec::new();
    output.try_reserve_exact(total).map_err(|_| Error::AllocationFailed)?;
    output.resize(total,0);

    output[0..4].copy_from_slice(&(input.len() as u32).to_le_bytes());
    output[4..6].copy_from_slice(&(codebook_bits as u16).to_le_bytes());

    let mut cursor = CODEBOOK_START;
    for (symbol,entry) in table.iter().enumerate() {
        if entry.len > 0 {
            bit_buffer::write_k_bits(&mut output,symbol as u16,&mut cursor,8);
            bit_buffer::write_k_bits(&mut output,entry.len as u16,&mut cursor,8);
            bit_buffer::write_k_bits(&mut output,entry.bits,&mut cursor,entry.len);
        }
    }
    for &byte in input {
        let entry = table[byte as usize];
        bit_buffer::write_k_bits(&mut output,entry.bits,&mut cursor,entry.len);
    }
    log::debug!("compressed {} bytes into {} ({} codebook bits, {} payload bits)",
        input.len(),total,codebook_bits,payload_bits);
    Ok(output)
}

/// Main expansion function.
/// Allocates the output buffer and fills it from the container.
pub fn expand(input: &[u8]) -> Result<Vec<u8>,Error> {
    if input.len() < HEADER_BASE_SIZE + 3 {
        return Err(Error::BadInput);
    }
    let expanded_length = u32::from_le_bytes([input[0],input[1],input[2],input[3]]);
    let mut output: Vec<u8> = Vec::new();
    output.try_reserve_exact(expanded_length as usize).map_err(|_| Error::AllocationFailed)?;
    output.resize(expanded_length as usize,0);
    expand_into(input,&mut output)?;
    Ok(output)
}

/// Expand into a caller-owned buffer, returning the number of bytes
/// decoded.  Fails without touching `out` if it is smaller than the
/// decompressed length recorded in the header.
pub fn expand_into(input: &[u8], out: &mut [u8]) -> Result<u32,Error> {
    if input.len() < HEADER_BASE_SIZE + 3 {
        return Err(Error::BadInput);
    }
    let expanded_length = u32::from_le_bytes([input[0],input[1],input[2],input[3]]);
    if (out.len() as u64) < expanded_length as u64 {
        return Err(Error::BufferTooSmall);
    }
    let codebook_bits = u16::from_le_bytes([input[4],input[5]]) as usize;

    let mut table = DecodingTable::create()?;
    let mut cursor = CODEBOOK_START;
    while cursor < CODEBOOK_START + codebook_bits {
        let symbol = (bit_buffer::peek_16(input,cursor) & 0xff) as u8;
        cursor += 8;
        let len = match bit_buffer::peek_16(input,cursor) & 0x0f {
            0 => MAX_CODE_LEN,
            field => field as u8
        };
        cursor += 8;
        let code = bit_buffer::peek_16(input,cursor) & ((1u32 << len) - 1) as u16;
        cursor += len as usize;
        table.insert(symbol,len,code);
    }
    log::debug!("expanding {} bytes from a {} bit codebook",expanded_length,codebook_bits);

    for slot in out[..expanded_length as usize].iter_mut() {
        let entry = table.lookup(bit_buffer::peek_16(input,cursor));
        *slot = entry.symbol;
        cursor += entry.len as usize;
    }
    Ok(expanded_length)
}

// *************** TESTS *****************

#[test]
fn compression_works() {
    // single distinct byte: the census bumps 0x60, both leaves get 1 bit
    // codes, and the payload is a single bit
    let compressed = compress("a".as_bytes()).expect("compression failed");
    let huff_str = "01 00 00 00 22 00 60 01 C2 02 06 00";
    assert_eq!(compressed,hex::decode(huff_str.replace(" ","")).unwrap());
    assert_eq!(expand(&compressed).expect("expansion failed"),"a".as_bytes());

    let compressed = compress("ab".as_bytes()).expect("compression failed");
    let huff_str = "02 00 00 00 22 00 61 01 C4 02 0A 00";
    assert_eq!(compressed,hex::decode(huff_str.replace(" ","")).unwrap());
    assert_eq!(expand(&compressed).expect("expansion failed"),"ab".as_bytes());
}

#[test]
fn invertibility() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let compressed = compress(test_data).expect("compression failed");
    let expanded = expand(&compressed).expect("expansion failed");
    assert_eq!(test_data.to_vec(),expanded);

    let test_data = "abracadabra".as_bytes();
    let compressed = compress(test_data).expect("compression failed");
    let expanded = expand(&compressed).expect("expansion failed");
    assert_eq!(test_data.to_vec(),expanded);
}

#[test]
fn degenerate_single_symbol() {
    let test_data = "aaaa".as_bytes();
    let compressed = compress(test_data).expect("compression failed");
    // 34 codebook bits plus a 4 bit payload round up to 5 data bytes
    assert_eq!(compressed.len(),12);
    let expanded = expand(&compressed).expect("expansion failed");
    assert_eq!(test_data.to_vec(),expanded);

    // the bump wraps upward when the lone byte is 0x00
    let test_data = vec![0u8];
    let compressed = compress(&test_data).expect("compression failed");
    let expanded = expand(&compressed).expect("expansion failed");
    assert_eq!(test_data,expanded);
}

#[test]
fn empty_input_fails() {
    assert!(matches!(compress(&[]),Err(Error::BadInput)));
}

#[test]
fn header_fields() {
    let test_data = "abracadabra".as_bytes();
    let compressed = compress(test_data).expect("compression failed");
    // decompressed length, little endian
    assert_eq!(compressed[0..4],[0x0b,0x00,0x00,0x00]);
    // five entries: one 1 bit code and four 3 bit codes make 93 bits
    assert_eq!(compressed[4..6],[0x5d,0x00]);
    assert_eq!(compressed.len(),22);
}

#[test]
fn recompression_reproduces_container() {
    let test_data = "the quick brown fox jumps over the lazy dog".as_bytes();
    let first = compress(test_data).expect("compression failed");
    let expanded = expand(&first).expect("expansion failed");
    assert_eq!(expanded,expand(&first).expect("expansion failed"));
    let second = compress(&expanded).expect("compression failed");
    assert_eq!(first,second);
}

#[test]
fn expand_into_checks_capacity() {
    let compressed = compress("hello".as_bytes()).expect("compression failed");
    let mut small = [0u8;3];
    assert!(matches!(expand_into(&compressed,&mut small),Err(Error::BufferTooSmall)));
    assert_eq!(small,[0u8;3]);

    let mut exact = [0u8;5];
    assert_eq!(expand_into(&compressed,&mut exact).expect("expansion failed"),5);
    assert_eq!(&exact,b"hello");

    let mut roomy = [0xaau8;8];
    assert_eq!(expand_into(&compressed,&mut roomy).expect("expansion failed"),5);
    assert_eq!(&roomy[0..5],b"hello");
    assert_eq!(roomy[5..8],[0xaa,0xaa,0xaa]);
}

#[test]
fn all_byte_values() {
    let test_data: Vec<u8> = (0u8..=255).collect();
    let compressed = compress(&test_data).expect("compression failed");
    // a flat census gives a perfectly balanced tree: 256 entries of 24 bits
    // each, then 256 8-bit codes, then the guard byte
    assert_eq!(compressed.len(),6 + (6144 + 2048) / 8 + 1);
    let expanded = expand(&compressed).expect("expansion failed");
    assert_eq!(test_data,expanded);
}

#[test]
fn uniform_64k() {
    let mut test_data: Vec<u8> = Vec::new();
    for byte in 0u8..=255 {
        for _i in 0..256 {
            test_data.push(byte);
        }
    }
    let compressed = compress(&test_data).expect("compression failed");
    let expanded = expand(&compressed).expect("expansion failed");
    assert_eq!(test_data,expanded);
}

#[test]
fn max_length_codes_round_trip() {
    // weights 1,1,2,4,...,2^15 chain into a skewed tree whose two rarest
    // bytes carry 16 bit codes, stored in the 4 bit length field as 0
    let mut test_data: Vec<u8> = Vec::new();
    test_data.push(0);
    for byte in 1u8..17 {
        for _i in 0..1usize << (byte - 1) {
            test_data.push(byte);
        }
    }
    let compressed = compress(&test_data).expect("compression failed");
    let expanded = expand(&compressed).expect("expansion failed");
    assert_eq!(test_data,expanded);
}

#[test]
fn ratio_bound() {
    for test_data in ["x","abracadabra","mississippi river basin"] {
        let compressed = compress(test_data.as_bytes()).expect("compression failed");
        let codebook_bits = u16::from_le_bytes([compressed[4],compressed[5]]) as usize;
        let worst = HEADER_BASE_SIZE + ((codebook_bits + 16 * test_data.len() + 7) >> 3) + 1;
        assert!(compressed.len() <= worst);
    }
}

#[test]
fn truncated_container_does_not_panic() {
    let compressed = compress("abracadabra".as_bytes()).expect("compression failed");
    // enough bytes to parse the header, nowhere near enough data; the
    // output is garbage of the advertised length, but decoding stays sane
    let expanded = expand(&compressed[0..10]).expect("expansion failed");
    assert_eq!(expanded.len(),11);
}
