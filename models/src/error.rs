use std::io;
use thiserror::Error;

/// Raw 부트 섹터를 `BootSector`로 변환하는 과정의 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Boot sector must be exactly 512 bytes, got {actual}")]
    WrongSize { actual: usize },

    #[error("OEM ID is {oem_id:?}, not \"NTFS    \"")]
    NotNtfs { oem_id: String },

    #[error("Invalid geometry: {bytes_per_sector} bytes/sector, {sectors_per_cluster} sectors/cluster")]
    InvalidGeometry { bytes_per_sector: u16, sectors_per_cluster: u8 },

    #[error("Reserved field '{field}' is not zero")]
    ReservedNotZero { field: &'static str },

    #[error("Boot sector parsing failed: {details}")]
    Parse { details: String },
}

/// 부트 섹터 지오메트리로 유효한 바이트 오프셋을 만들 수 없음
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetError {
    #[error("Bytes per sector or sectors per cluster is zero")]
    ZeroGeometry,

    #[error("MFT offset does not fit in 64 bits")]
    Overflow,
}

/// 볼륨 리더(collaborator)가 보고하는 Raw 읽기 에러
///
/// 코어는 이 값을 해석하지 않고 호출자에게 그대로 돌려준다.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    #[error("Access denied: raw volume access requires Administrator/root privileges")]
    AccessDenied,

    #[error("Device not found")]
    DeviceNotFound,

    #[error("I/O error (os code {0})")]
    Io(i32),

    #[error("Read is outside the volume")]
    OutOfRange,
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => ReadError::AccessDenied,
            io::ErrorKind::NotFound => ReadError::DeviceNotFound,
            io::ErrorKind::UnexpectedEof => ReadError::OutOfRange,
            // OS 에러 코드가 없으면 -1
            _ => ReadError::Io(err.raw_os_error().unwrap_or(-1)),
        }
    }
}

/// 시그니처 검증 자체를 수행하지 못함
///
/// 시그니처가 단순히 다른 경우는 에러가 아니라 `Ok(false)`다.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Short read: requested {requested} bytes, got {returned}")]
    ShortRead { requested: u32, returned: usize },

    #[error(transparent)]
    Read(#[from] ReadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_read_kinds() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(ReadError::from(denied), ReadError::AccessDenied);

        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(ReadError::from(missing), ReadError::DeviceNotFound);

        let eof = io::Error::from(io::ErrorKind::UnexpectedEof);
        assert_eq!(ReadError::from(eof), ReadError::OutOfRange);
    }

    #[test]
    fn os_code_is_kept_opaque() {
        let err = io::Error::from_raw_os_error(5);
        match ReadError::from(err) {
            // unix: EIO, windows: ERROR_ACCESS_DENIED
            ReadError::Io(code) => assert_eq!(code, 5),
            ReadError::AccessDenied => {}
            other => panic!("unexpected mapping: {other:?}"),
        }

        let other = io::Error::new(io::ErrorKind::Other, "no code");
        assert_eq!(ReadError::from(other), ReadError::Io(-1));
    }

    #[test]
    fn parse_error_message() {
        let err = DecodeError::Parse { details: "unexpected end of input".to_string() };
        assert_eq!(err.to_string(), "Boot sector parsing failed: unexpected end of input");
    }
}
