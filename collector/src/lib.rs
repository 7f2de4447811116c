pub mod reader;
pub mod volume;
pub mod mft;

pub use mft::{probe, ProbeOptions, ProbeReport, SignatureCheck};
pub use volume::{SeekVolume, VolumeReader};
