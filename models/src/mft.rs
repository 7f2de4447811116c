use std::fmt;

/// MFT 레코드 첫 4바이트 "FILE"을 리틀 엔디안 u32로 읽은 값
pub const FILE_RECORD_SIGNATURE: u32 = 0x454C_4946;

/// 시그니처 확인 시 읽는 바이트 수
pub const FILE_RECORD_SIGNATURE_LEN: u32 = 4;

/// 부트 섹터 0x40 바이트에 인코딩된 파일 레코드 크기
/// - 음수 n: 2^|n| 바이트
/// - 양수 n: n 클러스터
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRecordSize {
    Bytes(u32),
    Clusters(u8),
}

impl FileRecordSize {
    pub fn from_raw(raw: i8) -> Option<Self> {
        match raw {
            0 => None,
            n if n > 0 => Some(Self::Clusters(n as u8)),
            n => {
                let shift = n.unsigned_abs() as u32;
                1u32.checked_shl(shift).map(Self::Bytes)
            }
        }
    }

    /// 주어진 클러스터 크기 기준 레코드 바이트 수
    pub fn bytes(&self, cluster_size: u64) -> Option<u64> {
        match *self {
            Self::Bytes(b) => Some(b as u64),
            Self::Clusters(c) => cluster_size.checked_mul(c as u64),
        }
    }
}

impl fmt::Display for FileRecordSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(b) => write!(f, "{} bytes", b),
            Self::Clusters(c) => write!(f, "{} cluster(s)", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_byte_decoding() {
        assert_eq!(FileRecordSize::from_raw(-10), Some(FileRecordSize::Bytes(1024)));
        assert_eq!(FileRecordSize::from_raw(-12), Some(FileRecordSize::Bytes(4096)));
        assert_eq!(FileRecordSize::from_raw(1), Some(FileRecordSize::Clusters(1)));
        assert_eq!(FileRecordSize::from_raw(0), None);
        // 2^128은 u32 범위 초과
        assert_eq!(FileRecordSize::from_raw(i8::MIN), None);
    }

    #[test]
    fn signature_constant_is_file_in_disk_order() {
        assert_eq!(u32::from_le_bytes(*b"FILE"), FILE_RECORD_SIGNATURE);
    }
}
