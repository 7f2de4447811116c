use models::mft::{FILE_RECORD_SIGNATURE, FILE_RECORD_SIGNATURE_LEN};
use models::ntfs::BootSector;
use models::{OffsetError, ReadError, VerifyError};

/// $MFT가 위치한 실제 바이트 오프셋 계산
/// `mft_start_cluster * sectors_per_cluster * bytes_per_sector`
pub fn compute_offset(boot: &BootSector) -> Result<u64, OffsetError> {
    cluster_to_offset(boot, boot.mft_start_cluster)
}

/// $MFTMirr의 바이트 오프셋 ([`compute_offset`]과 동일한 규칙)
pub fn compute_mirror_offset(boot: &BootSector) -> Result<u64, OffsetError> {
    cluster_to_offset(boot, boot.mft2_start_cluster)
}

fn cluster_to_offset(boot: &BootSector, lcn: u64) -> Result<u64, OffsetError> {
    // 지오메트리가 0이면 오프셋 자체가 의미 없음 (오버플로 검사보다 우선)
    if boot.bytes_per_sector == 0 || boot.sectors_per_cluster == 0 {
        return Err(OffsetError::ZeroGeometry);
    }

    // 손상된 VBR에서는 곱이 64비트를 넘을 수 있다
    lcn.checked_mul(boot.sectors_per_cluster as u64)
        .and_then(|sectors| sectors.checked_mul(boot.bytes_per_sector as u64))
        .ok_or(OffsetError::Overflow)
}

/// `offset` 위치의 4바이트를 `read_at`으로 읽어 "FILE" 시그니처와 비교한다.
///
/// `Ok(false)`: 읽기는 성공했으나 해당 위치에 파일 레코드 헤더가 없음.
/// 읽기 에러는 `VerifyError::Read`에 그대로 담아 반환한다.
pub fn verify_signature<F>(offset: u64, read_at: F) -> Result<bool, VerifyError>
where
    F: FnOnce(u64, u32) -> Result<Vec<u8>, ReadError>,
{
    let data = read_at(offset, FILE_RECORD_SIGNATURE_LEN)?;

    // collaborator가 요청보다 적게 돌려준 경우
    let Some(sig) = data.get(..FILE_RECORD_SIGNATURE_LEN as usize) else {
        return Err(VerifyError::ShortRead {
            requested: FILE_RECORD_SIGNATURE_LEN,
            returned: data.len(),
        });
    };

    let value = u32::from_le_bytes([sig[0], sig[1], sig[2], sig[3]]);
    Ok(value == FILE_RECORD_SIGNATURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ntfs::decode;
    use crate::ntfs::tests::raw_boot_sector;

    fn boot(bytes_per_sector: u16, sectors_per_cluster: u8, mft_lcn: u64) -> BootSector {
        decode(&raw_boot_sector(bytes_per_sector, sectors_per_cluster, mft_lcn)).unwrap()
    }

    #[test]
    fn offset_is_lcn_times_cluster_size() {
        assert_eq!(compute_offset(&boot(512, 8, 4)), Ok(16384));
        assert_eq!(compute_offset(&boot(4096, 1, 786_432)), Ok(3_221_225_472));
        assert_eq!(compute_offset(&boot(512, 8, 0)), Ok(0));
    }

    #[test]
    fn offset_is_deterministic() {
        let bs = boot(512, 8, 0xC0000);
        assert_eq!(compute_offset(&bs), compute_offset(&bs.clone()));
    }

    #[test]
    fn zero_geometry_is_rejected() {
        assert_eq!(compute_offset(&boot(0, 8, 4)), Err(OffsetError::ZeroGeometry));
        assert_eq!(compute_offset(&boot(512, 0, 4)), Err(OffsetError::ZeroGeometry));
        // 곱이 오버플로하지 않아도 ZeroGeometry가 우선
        assert_eq!(compute_offset(&boot(0, 0, 0)), Err(OffsetError::ZeroGeometry));
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(compute_offset(&boot(512, 8, u64::MAX)), Err(OffsetError::Overflow));
        // 첫 번째 곱은 통과, 두 번째 곱에서 오버플로
        assert_eq!(compute_offset(&boot(4096, 1, 1 << 53)), Err(OffsetError::Overflow));
    }

    #[test]
    fn mirror_offset_uses_mft2_cluster() {
        // raw_boot_sector는 $MFTMirr를 LCN 1000에 둔다
        assert_eq!(compute_mirror_offset(&boot(512, 8, 4)), Ok(1000 * 4096));
    }

    #[test]
    fn signature_match() {
        let mut requested = None;
        let ok = verify_signature(16384, |offset, len| {
            requested = Some((offset, len));
            Ok(vec![0x46, 0x49, 0x4C, 0x45])
        });

        assert_eq!(ok, Ok(true));
        assert_eq!(requested, Some((16384, 4)));
    }

    #[test]
    fn signature_mismatch_is_not_an_error() {
        assert_eq!(verify_signature(0, |_, _| Ok(vec![0, 0, 0, 0])), Ok(false));
        assert_eq!(verify_signature(0, |_, _| Ok(b"BAAD".to_vec())), Ok(false));
        // 빅 엔디안 순서는 시그니처가 아님
        assert_eq!(verify_signature(0, |_, _| Ok(b"ELIF".to_vec())), Ok(false));
    }

    #[test]
    fn short_read_is_reported() {
        for len in 0..4 {
            let err = verify_signature(0, |_, _| Ok(vec![0x46; len])).unwrap_err();
            assert_eq!(err, VerifyError::ShortRead { requested: 4, returned: len });
        }
    }

    #[test]
    fn read_errors_pass_through() {
        for kind in [ReadError::AccessDenied, ReadError::DeviceNotFound, ReadError::Io(21), ReadError::OutOfRange] {
            assert_eq!(verify_signature(0, |_, _| Err(kind)), Err(VerifyError::Read(kind)));
        }
    }

    #[test]
    fn end_to_end_with_stub_reader() {
        let bs = boot(512, 8, 4);
        let offset = compute_offset(&bs).unwrap();
        assert_eq!(offset, 0x4000);

        let stub = |at: u64, len: u32| {
            if at == 16384 && len == 4 { Ok(b"FILE".to_vec()) } else { Err(ReadError::OutOfRange) }
        };
        assert_eq!(verify_signature(offset, stub), Ok(true));

        let denied = |_: u64, _: u32| Err(ReadError::AccessDenied);
        assert_eq!(
            verify_signature(offset, denied),
            Err(VerifyError::Read(ReadError::AccessDenied))
        );
    }
}
