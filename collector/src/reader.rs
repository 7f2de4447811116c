use std::fs::File;
use std::io;

/// 볼륨(`\\.\C:`), 블록 디바이스(`/dev/sda1`), 이미지 파일을 읽기 전용으로 연다.
#[cfg(windows)]
pub fn open_volume(path: &str) -> io::Result<File> {
    use std::os::windows::io::FromRawHandle;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::HANDLE;
    use windows::Win32::Storage::FileSystem::{
        CreateFileW, FILE_ATTRIBUTE_NORMAL, FILE_READ_DATA, FILE_SHARE_READ, FILE_SHARE_WRITE,
        OPEN_EXISTING,
    };

    let wide: Vec<u16> = path.encode_utf16().chain(Some(0)).collect();

    unsafe {
        // 마운트된 볼륨은 OS가 쓰기로 열고 있으므로 읽기/쓰기 공유 모두 허용
        // FILE_READ_DATA: 데이터 읽기 권한만 요청
        let handle: HANDLE = CreateFileW(
            PCWSTR(wide.as_ptr()),
            FILE_READ_DATA.0,
            FILE_SHARE_READ | FILE_SHARE_WRITE,
            None,
            OPEN_EXISTING,
            FILE_ATTRIBUTE_NORMAL,
            HANDLE::default(),
        )
        .map_err(|e| io::Error::from_raw_os_error(e.code().0 & 0xFFFF))?;

        Ok(File::from_raw_handle(handle.0 as _))
    }
}

/// 볼륨(`\\.\C:`), 블록 디바이스(`/dev/sda1`), 이미지 파일을 읽기 전용으로 연다.
#[cfg(not(windows))]
pub fn open_volume(path: &str) -> io::Result<File> {
    File::open(path)
}

/// 명령줄에서 볼륨을 지정하지 않았을 때 검사할 기본 볼륨
pub fn default_volume<'a>() -> Option<&'a str> {
    if cfg!(windows) {
        Some(r"\\.\C:")
    } else {
        None
    }
}
