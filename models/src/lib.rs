pub mod error;
pub mod ntfs;
pub mod mft;

pub use error::{DecodeError, OffsetError, ReadError, VerifyError};
pub use mft::{FileRecordSize, FILE_RECORD_SIGNATURE};
pub use ntfs::{BootSector, BOOT_SECTOR_SIZE, NTFS_OEM_ID};
