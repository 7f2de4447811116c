pub mod ntfs;
pub mod mft;

pub use mft::{compute_mirror_offset, compute_offset, verify_signature};
pub use ntfs::{decode, validate};
