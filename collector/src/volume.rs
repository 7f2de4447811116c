use std::io::{Read, Seek, SeekFrom};
use models::ntfs::BOOT_SECTOR_SIZE;
use models::ReadError;

/// 단일 볼륨에 대한 Raw 읽기 인터페이스
pub trait VolumeReader {
    /// 볼륨의 첫 512바이트 (VBR)
    fn read_sector0(&mut self) -> Result<[u8; BOOT_SECTOR_SIZE], ReadError>;

    /// 절대 바이트 오프셋 `offset`에서 `length` 바이트를 읽는다.
    fn read_at(&mut self, offset: u64, length: u32) -> Result<Vec<u8>, ReadError>;

    /// VBR 디코딩 후 볼륨의 실제 섹터 크기를 알려준다. (기본: 무시)
    fn set_sector_size(&mut self, _bytes_per_sector: u64) {}
}

/// 읽기 정렬 단위의 상한 (64KB)
pub const MAX_ALIGNMENT: u64 = 64 * 1024;

/// 정렬 값을 1..=64KB 범위의 2의 거듭제곱으로 맞춘다.
pub fn normalize_alignment(alignment: u64) -> u64 {
    alignment.clamp(1, MAX_ALIGNMENT).next_power_of_two()
}

/// Seek 가능한 스트림(볼륨 핸들, 이미지 파일, 메모리 버퍼) 위의 `VolumeReader`
///
/// Raw 볼륨 핸들은 섹터 정렬되지 않은 읽기를 거부하므로,
/// 모든 읽기를 `alignment` 단위로 넓혀 읽은 뒤 요청 구간만 잘라낸다.
pub struct SeekVolume<R> {
    inner: R,
    alignment: u64,
}

impl<R: Read + Seek> SeekVolume<R> {
    pub const DEFAULT_ALIGNMENT: u64 = 512;

    pub fn new(inner: R) -> Self {
        Self { inner, alignment: Self::DEFAULT_ALIGNMENT }
    }

    /// 범위를 벗어나거나 2의 거듭제곱이 아닌 값은 `normalize_alignment`로 보정된다.
    pub fn with_alignment(mut self, alignment: u64) -> Self {
        self.alignment = normalize_alignment(alignment);
        self
    }

    pub fn alignment(&self) -> u64 {
        self.alignment
    }

    /// 스트림에 남은 만큼 `buffer`를 채우고, 읽은 바이트 수를 반환한다.
    fn read_full(&mut self, start: u64, buffer: &mut [u8]) -> Result<usize, ReadError> {
        self.inner.seek(SeekFrom::Start(start))?;

        let mut filled = 0;
        while filled < buffer.len() {
            match self.inner.read(&mut buffer[filled..]) {
                Ok(0) => break, // EOF
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl<R: Read + Seek> VolumeReader for SeekVolume<R> {
    fn read_sector0(&mut self) -> Result<[u8; BOOT_SECTOR_SIZE], ReadError> {
        let data = self.read_at(0, BOOT_SECTOR_SIZE as u32)?;

        data.try_into().map_err(|_| ReadError::OutOfRange)
    }

    fn read_at(&mut self, offset: u64, length: u32) -> Result<Vec<u8>, ReadError> {
        // 1. 요청 구간을 정렬 경계로 확장
        let start = offset - offset % self.alignment;
        let head = (offset - start) as usize; // alignment <= 64KB
        let end = offset.checked_add(length as u64).ok_or(ReadError::OutOfRange)?;
        let aligned_end = match end % self.alignment {
            0 => end,
            rem => end.checked_add(self.alignment - rem).ok_or(ReadError::OutOfRange)?,
        };

        // 2. 정렬된 구간 읽기 (32비트 타겟에서 usize 절삭 방지)
        let size = usize::try_from(aligned_end - start).map_err(|_| ReadError::OutOfRange)?;
        let mut buffer = vec![0u8; size];
        let filled = self.read_full(start, &mut buffer)?;

        // 요청 시작점이 스트림 끝을 넘어선 경우
        if filled <= head && length > 0 {
            return Err(ReadError::OutOfRange);
        }

        // 3. 요청 구간만 잘라서 반환 (끝에 걸친 읽기는 짧게 반환)
        let available = filled.saturating_sub(head).min(length as usize);
        buffer.truncate(head + available);
        buffer.drain(..head);
        Ok(buffer)
    }

    /// 4K 네이티브 디스크는 512 정렬 읽기를 거부하므로 섹터 크기까지 넓힌다.
    fn set_sector_size(&mut self, bytes_per_sector: u64) {
        if bytes_per_sector.is_power_of_two() && bytes_per_sector <= MAX_ALIGNMENT {
            self.alignment = self.alignment.max(bytes_per_sector);
        }
    }
}
