//! Moving binary files out of the sandbox.
//!
//! The interpreter only returns text, so a helper script reads the file
//! inside the sandbox and prints it base64-encoded between two sentinel
//! lines. The sentinels contain `_`, which is outside the standard base64
//! alphabet, so they can never appear inside the payload.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use codebox_error::{Error, ErrorKind, Result};

use crate::client::SandboxClient;
use crate::script::python_literal;
use crate::types::Language;

pub const START_MARKER: &str = "BASE64_START";
pub const END_MARKER: &str = "BASE64_END";
pub const NOT_FOUND_MARKER: &str = "ERROR: File not found";

/// Python that prints the file at `remote_path` framed by the sentinels, or
/// the not-found marker.
pub fn download_script(remote_path: &str) -> String {
    format!(
        r#"import base64
import os

path = {path}
if not os.path.exists(path):
    print("{not_found}")
else:
    with open(path, "rb") as f:
        encoded = base64.b64encode(f.read()).decode("utf-8")
    print("{start}")
    print(encoded)
    print("{end}")
"#,
        path = python_literal(remote_path),
        not_found = NOT_FOUND_MARKER,
        start = START_MARKER,
        end = END_MARKER,
    )
}

/// Frame `bytes` the way the download script prints them.
pub fn frame_payload(bytes: &[u8]) -> String {
    format!("{START_MARKER}\n{}\n{END_MARKER}", STANDARD.encode(bytes))
}

/// Extract and decode the payload between the first start sentinel and the
/// end sentinel that follows it. Whitespace inside the payload is ignored.
pub fn decode_framed(text: &str) -> Result<Vec<u8>> {
    let start = text
        .find(START_MARKER)
        .map(|i| i + START_MARKER.len())
        .ok_or_else(|| Error::new(ErrorKind::TransferFailed, "start marker not found in output"))?;
    let len = text[start..]
        .find(END_MARKER)
        .ok_or_else(|| Error::new(ErrorKind::TransferFailed, "end marker not found in output"))?;

    let payload: String = text[start..start + len]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    STANDARD.decode(payload.as_bytes()).map_err(|e| {
        Error::parse_failed("invalid base64 payload")
            .with_operation("transfer::decode_framed")
            .set_source(e)
    })
}

/// Download `remote_path` from the sandbox into `local_path`, returning the
/// number of bytes written.
///
/// Nothing is written locally unless the whole payload decoded.
pub async fn fetch_file(
    client: &SandboxClient,
    remote_path: &str,
    local_path: &Path,
) -> Result<usize> {
    let script = download_script(remote_path);
    let result = client
        .execute(&script, Language::Python, false)
        .await
        .map_err(|e| e.into_error("transfer::fetch_file"))?;

    if result.is_failure() {
        return Err(Error::execution_failed(result.status.as_str())
            .with_operation("transfer::fetch_file")
            .with_context("path", remote_path));
    }

    let stdout = result.stdout_text();
    if stdout.contains(NOT_FOUND_MARKER) {
        return Err(Error::transfer_failed(remote_path, "file not found in sandbox")
            .with_operation("transfer::fetch_file"));
    }

    let bytes = decode_framed(&stdout).map_err(|e| e.with_context("path", remote_path))?;

    if let Some(parent) = local_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(local_path, &bytes)?;
    Ok(bytes.len())
}

/// Best-effort download. Failures are logged and reported as `false`.
pub async fn download_file(
    client: &SandboxClient,
    remote_path: &str,
    local_path: impl AsRef<Path>,
) -> bool {
    let local_path = local_path.as_ref();
    match fetch_file(client, remote_path, local_path).await {
        Ok(bytes) => {
            tracing::info!(remote = remote_path, local = %local_path.display(), bytes, "downloaded file");
            true
        }
        Err(err) => {
            tracing::warn!(remote = remote_path, error = %err, "download failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framed_payload_decodes_to_original_bytes() {
        let png = [0x89u8, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff, 0xfe];
        assert_eq!(decode_framed(&frame_payload(&png)).unwrap(), png);
        assert_eq!(decode_framed(&frame_payload(&[])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn any_byte_sequence_survives_framing() {
        let every_byte: Vec<u8> = (0..=255u8).collect();
        assert_eq!(decode_framed(&frame_payload(&every_byte)).unwrap(), every_byte);

        // xorshift content, every padding remainder
        let mut state = 0x2545_f491u32;
        for len in 0..600 {
            let bytes: Vec<u8> = (0..len)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    (state >> 24) as u8
                })
                .collect();
            assert_eq!(decode_framed(&frame_payload(&bytes)).unwrap(), bytes, "len {len}");
        }
    }

    #[test]
    fn surrounding_noise_and_wrapped_lines_are_ignored() {
        let text = "Matplotlib is building the font cache\nBASE64_START\naGVs\nbG8=\r\nBASE64_END\ntrailing";
        assert_eq!(decode_framed(text).unwrap(), b"hello");
    }

    #[test]
    fn end_marker_is_searched_after_start() {
        let text = "BASE64_END\nBASE64_START\naGk=\nBASE64_END";
        assert_eq!(decode_framed(text).unwrap(), b"hi");
    }

    #[test]
    fn missing_markers_fail() {
        assert_eq!(decode_framed("no markers").unwrap_err().kind(), ErrorKind::TransferFailed);
        assert_eq!(
            decode_framed("BASE64_START\naGk=").unwrap_err().kind(),
            ErrorKind::TransferFailed
        );
    }

    #[test]
    fn corrupt_payload_fails() {
        let err = decode_framed("BASE64_START\n!!!not base64!!!\nBASE64_END").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
    }

    #[test]
    fn script_embeds_path_as_literal() {
        let script = download_script("/tmp/it's \"odd\".png");
        assert!(script.contains(r#"path = "/tmp/it's \"odd\".png""#));
        assert!(script.contains("print(\"BASE64_START\")"));
        assert!(script.contains("print(\"ERROR: File not found\")"));
    }
}
