use anyhow::{Context, Result};
use models::ntfs::BootSector;
use models::OffsetError;
use parser::mft::{compute_mirror_offset, compute_offset, verify_signature};
use parser::ntfs::{decode, validate};
use crate::volume::VolumeReader;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeOptions {
    /// 오프셋 계산 전에 OEM ID / 지오메트리 / 예약 필드 검증 수행
    pub strict: bool,
    /// $MFTMirr 위치도 함께 검증
    pub check_mirror: bool,
}

/// 메타데이터 파일 위치와 그 위치의 "FILE" 시그니처 확인 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureCheck {
    pub offset: u64,
    pub verified: bool,
}

/// 한 번의 검사 결과. 시그니처 불일치는 에러가 아니라 결과 값이다.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub boot_sector: BootSector,
    pub mft: SignatureCheck,
    pub mirror: Option<SignatureCheck>,
    pub file_record_bytes: Option<u64>,
}

impl ProbeReport {
    pub fn is_consistent(&self) -> bool {
        self.mft.verified && self.mirror.map_or(true, |m| m.verified)
    }
}

/// VBR을 읽어 $MFT 위치를 계산하고, 해당 위치의 레코드 시그니처를 확인한다.
pub fn probe<V: VolumeReader>(volume: &mut V, options: ProbeOptions) -> Result<ProbeReport> {
    // 1. VBR 읽기 및 파싱
    let vbr_buffer = volume.read_sector0().context("Failed to read VBR")?;
    let boot_sector = decode(&vbr_buffer).context("Failed to parse VBR")?;
    tracing::debug!(
        bytes_per_sector = boot_sector.bytes_per_sector,
        sectors_per_cluster = boot_sector.sectors_per_cluster,
        mft_lcn = boot_sector.mft_start_cluster,
        mft_mirr_lcn = boot_sector.mft2_start_cluster,
        "Boot sector decoded"
    );

    // 2. (선택) 구조 검증
    if options.strict {
        validate(&boot_sector).context("Boot sector failed validation")?;
        tracing::debug!("Boot sector passed strict validation");
    } else if !boot_sector.has_ntfs_oem_id() {
        tracing::warn!("OEM ID is {:?}, volume may not be NTFS", boot_sector.oem_id_str());
    }

    // 섹터 크기를 알았으니 이후 읽기는 섹터 단위로 정렬
    volume.set_sector_size(boot_sector.bytes_per_sector as u64);

    // 3. $MFT 오프셋 계산 + 시그니처 확인
    let mft = check_at(volume, compute_offset(&boot_sector), "$MFT")?;

    let mirror = if options.check_mirror {
        Some(check_at(volume, compute_mirror_offset(&boot_sector), "$MFTMirr")?)
    } else {
        None
    };

    let file_record_bytes = boot_sector.file_record_bytes();
    if file_record_bytes.is_none() {
        tracing::warn!(raw = boot_sector.clusters_per_file_record, "Unusable file record size");
    }

    Ok(ProbeReport {
        boot_sector,
        mft,
        mirror,
        file_record_bytes,
    })
}

fn check_at<V: VolumeReader>(
    volume: &mut V,
    offset: Result<u64, OffsetError>,
    name: &str,
) -> Result<SignatureCheck> {
    let offset = offset.with_context(|| format!("Failed to compute {} offset", name))?;
    tracing::info!("{} expected at {:#X}", name, offset);

    let verified = verify_signature(offset, |at, len| volume.read_at(at, len))
        .with_context(|| format!("Failed to read {} signature at {:#X}", name, offset))?;

    if verified {
        tracing::info!("{} signature verified", name);
    } else {
        tracing::warn!("No FILE signature at {:#X} ({})", offset, name);
    }

    Ok(SignatureCheck { offset, verified })
}
