use models::ntfs::{BootSector, BOOT_SECTOR_SIZE};
use models::DecodeError;
use binrw::BinReaderExt;
use std::io::Cursor;

/// 정확히 512바이트 Raw Data를 입력받아 NTFS BootSector 구조체로 변환한다.
///
/// 구조만 확인한다. OEM ID, Jump 코드, 예약 필드는 그대로 받아들이므로
/// 지오메트리를 신뢰하기 전에 [`validate`]를 호출해야 한다.
pub fn decode(data: &[u8]) -> Result<BootSector, DecodeError> {
    // 512바이트가 아니면 필드 오프셋 자체가 의미 없음
    if data.len() != BOOT_SECTOR_SIZE {
        return Err(DecodeError::WrongSize { actual: data.len() });
    }

    let mut reader = Cursor::new(data);

    // binrw의 read_le()를 사용해 리틀 엔디안으로 필드 단위 파싱
    let boot_sector: BootSector = reader.read_le()
        .map_err(|e| DecodeError::Parse { details: e.to_string() })?;

    Ok(boot_sector)
}

/// 디코딩된 부트 섹터의 의미 검증 (선택 단계)
///
/// - OEM ID가 "NTFS    "인지
/// - 섹터/클러스터 크기가 NTFS가 허용하는 2의 거듭제곱인지
/// - BPB 예약 필드가 0인지
pub fn validate(boot: &BootSector) -> Result<(), DecodeError> {
    if !boot.has_ntfs_oem_id() {
        return Err(DecodeError::NotNtfs { oem_id: boot.oem_id_str() });
    }

    let bps = boot.bytes_per_sector;
    let spc = boot.sectors_per_cluster;
    // 섹터: 256~4096, 클러스터: 1~128 섹터 (u8이므로 2의 거듭제곱이면 최대 128)
    if !bps.is_power_of_two() || !(256..=4096).contains(&bps) || !spc.is_power_of_two() {
        return Err(DecodeError::InvalidGeometry {
            bytes_per_sector: bps,
            sectors_per_cluster: spc,
        });
    }

    // NTFS에서 항상 0이어야 하는 FAT 호환 필드들
    let reserved: [(&'static str, bool); 5] = [
        ("reserved_sectors", boot.reserved_sectors == 0),
        ("always_zero", boot.always_zero == [0; 3]),
        ("not_used", boot.not_used == 0),
        ("always_zero2", boot.always_zero2 == 0),
        ("not_used2", boot.not_used2 == 0),
    ];
    for (field, zero) in reserved {
        if !zero {
            return Err(DecodeError::ReservedNotZero { field });
        }
    }

    Ok(())
}
