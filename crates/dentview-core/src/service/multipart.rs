use std::time::{SystemTime, UNIX_EPOCH};

/// A `multipart/form-data` body carrying a single file field.
pub struct MultipartBody {
    pub boundary: String,
    pub bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

pub fn unique_boundary() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("----dentview{nanos:032x}")
}

/// Encode one file part named `field`.
pub fn file_part(boundary: &str, field: &str, filename: &str, data: &[u8]) -> MultipartBody {
    // Quotes would terminate the header parameter early.
    let filename = filename.replace('"', "_");
    let mut bytes = Vec::with_capacity(data.len() + 256);
    bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    bytes.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    bytes.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    bytes.extend_from_slice(data);
    bytes.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    MultipartBody {
        boundary: boundary.to_string(),
        bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_part_layout() {
        let body = file_part("XYZ", "file", "scan.dcm", b"\x00\x01");
        let expected = b"--XYZ\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"scan.dcm\"\r\n\
Content-Type: application/octet-stream\r\n\r\n\x00\x01\r\n--XYZ--\r\n";
        assert_eq!(body.bytes, expected.to_vec());
        assert_eq!(body.content_type(), "multipart/form-data; boundary=XYZ");
    }

    #[test]
    fn test_filename_quotes_are_replaced() {
        let body = file_part("B", "file", "a\"b.png", b"");
        let text = String::from_utf8(body.bytes).unwrap();
        assert!(text.contains("filename=\"a_b.png\""));
    }

    #[test]
    fn test_boundaries_differ() {
        let a = unique_boundary();
        std::thread::sleep(std::time::Duration::from_millis(1));
        assert_ne!(a, unique_boundary());
    }
}
