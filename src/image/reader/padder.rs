use std::iter::{repeat, Chain, Copied, Repeat, Take};
use std::slice::Iter;

/// Raw bytes extended with zeros up to a padded length. Never truncates.
pub struct PaddedBytes<'a> {
    bytes: &'a [u8],
    padded_length: usize,
}

impl<'a> PaddedBytes<'a> {
    pub fn new(bytes: &'a [u8], padded_length: usize) -> Self {
        PaddedBytes {
            bytes,
            padded_length: padded_length.max(bytes.len()),
        }
    }

    pub fn padded_length(&self) -> usize {
        self.padded_length
    }

    pub fn padding(&self) -> usize {
        self.padded_length - self.bytes.len()
    }

    pub fn iter(&self) -> Chain<Copied<Iter<'a, u8>>, Take<Repeat<u8>>> {
        self.bytes
            .iter()
            .copied()
            .chain(repeat(0).take(self.padding()))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut padded = Vec::with_capacity(self.padded_length);
        padded.extend_from_slice(self.bytes);
        padded.resize(self.padded_length, 0);
        padded
    }
}
