use binrw::BinRead;
use crate::mft::FileRecordSize;

/// NTFS VBR 크기
pub const BOOT_SECTOR_SIZE: usize = 512;

/// 0x03 위치의 OEM ID (모든 NTFS 포맷터가 기록)
pub const NTFS_OEM_ID: [u8; 8] = *b"NTFS    ";

/// 0x1FE 위치의 섹터 끝 마커 (디스크 상에서는 55 AA)
pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// NTFS Volume Boot Record (첫 512바이트)
/// #[br(little)] : 호스트와 무관하게 디스크 상의 모든 다중 바이트 필드는 리틀 엔디안이다.
/// 필드 단위로 읽으므로 호스트의 구조체 레이아웃/패딩에 의존하지 않는다.
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct BootSector {
    // 0x00: Jump Instruction (3 bytes) + OEM ID (8 bytes)
    pub jump: [u8; 3],                  // EB 52 90
    pub oem_id: [u8; 8],                // "NTFS    "

    // 0x0B: BPB (BIOS Parameter Block) 시작
    pub bytes_per_sector: u16,          // 섹터당 바이트 (보통 512, 4K 디스크는 4096)
    pub sectors_per_cluster: u8,        // 클러스터당 섹터 (보통 8 -> 4KB)
    pub reserved_sectors: u16,          // 0x0E: NTFS에서는 항상 0
    pub always_zero: [u8; 3],           // 0x10: FAT 개수 등, 항상 0
    pub not_used: u16,                  // 0x13: 항상 0
    pub media_descriptor: u8,           // 0x15: 0xF8 = 하드 디스크
    pub always_zero2: u16,              // 0x16: 항상 0
    pub sectors_per_track: u16,         // 0x18
    pub number_of_heads: u16,           // 0x1A
    pub hidden_sectors: u32,            // 0x1C: 파티션 시작 섹터
    pub not_used2: u32,                 // 0x20: 항상 0
    pub not_used3: u32,                 // 0x24: 보통 0x00800080

    // 0x28: 확장 BPB
    pub total_sectors: u64,             // 볼륨 전체 크기
    pub mft_start_cluster: u64,         // $MFT의 시작 클러스터 번호 (LCN)
    pub mft2_start_cluster: u64,        // $MFTMirr 위치 (LCN)
    #[br(pad_after = 3)]
    pub clusters_per_file_record: i8,   // 0x40: 음수면 2^|n| 바이트, 양수면 n 클러스터
    #[br(pad_after = 3)]
    pub clusters_per_index_block: i8,   // 0x44: 인코딩 방식 동일
    pub volume_serial_number: u64,      // 0x48
    pub checksum: u32,                  // 0x50: 사용되지 않음

    // 0x54 ~ 0x1FD: 부트스트랩 코드 (426 bytes skip)
    #[br(pad_before = 426)]
    pub end_of_sector_marker: u16,      // 0xAA55
}

impl BootSector {
    /// 클러스터 크기(Byte 단위)를 반환 (64비트 초과 시 None)
    pub fn cluster_size(&self) -> Option<u64> {
        (self.bytes_per_sector as u64).checked_mul(self.sectors_per_cluster as u64)
    }

    /// 0x40의 부호 있는 바이트를 파일 레코드 크기로 해석
    pub fn file_record_size(&self) -> Option<FileRecordSize> {
        FileRecordSize::from_raw(self.clusters_per_file_record)
    }

    /// MFT 파일 레코드 하나의 바이트 크기 (보통 1024)
    pub fn file_record_bytes(&self) -> Option<u64> {
        self.file_record_size()?.bytes(self.cluster_size()?)
    }

    pub fn has_ntfs_oem_id(&self) -> bool {
        self.oem_id == NTFS_OEM_ID
    }

    pub fn oem_id_str(&self) -> String {
        String::from_utf8_lossy(&self.oem_id).to_string()
    }
}
