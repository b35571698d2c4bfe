//! Minimal `multipart/form-data` reader for upload endpoints.
//!
//! Handles what browser forms send: a boundary from the `Content-Type`
//! header, `Content-Disposition` with `name` and optional `filename`, an
//! optional per-part `Content-Type`. Nested multipart and transfer encodings
//! are rejected as invalid requests.

use crate::error::AnalysisError;

/// One form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Split `body` into parts using the boundary announced in `content_type`.
    pub fn parse(content_type: &str, body: &[u8]) -> Result<Self, AnalysisError> {
        let boundary = boundary_of(content_type)?;
        let delimiter = format!("--{boundary}").into_bytes();
        let next_delimiter = format!("\r\n--{boundary}").into_bytes();

        let mut pos = find(body, &delimiter, 0)
            .ok_or_else(|| AnalysisError::invalid_request("multipart body has no boundary"))?;
        let mut parts = Vec::new();
        loop {
            let mut cursor = pos + delimiter.len();
            if body[cursor..].starts_with(b"--") {
                break;
            }
            cursor += line_break_len(&body[cursor..]);
            let header_end = find(body, b"\r\n\r\n", cursor)
                .ok_or_else(|| AnalysisError::invalid_request("multipart part without headers"))?;
            let headers = std::str::from_utf8(&body[cursor..header_end])
                .map_err(|_| AnalysisError::invalid_request("multipart headers are not UTF-8"))?;
            let content_start = header_end + 4;
            let content_end = find(body, &next_delimiter, content_start)
                .ok_or_else(|| AnalysisError::invalid_request("unterminated multipart part"))?;

            parts.push(parse_part(headers, &body[content_start..content_end])?);
            pos = content_end + 2;
        }
        log::debug!("multipart: {} part(s)", parts.len());
        Ok(Self { parts })
    }

    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// UTF-8 text of a field, `None` when absent.
    pub fn text(&self, name: &str) -> Result<Option<&str>, AnalysisError> {
        match self.part(name) {
            None => Ok(None),
            Some(p) => std::str::from_utf8(&p.data)
                .map(|s| Some(s.trim()))
                .map_err(|_| {
                    AnalysisError::invalid_request(format!("field '{name}' is not UTF-8"))
                }),
        }
    }
}

fn boundary_of(content_type: &str) -> Result<String, AnalysisError> {
    let mut params = content_type.split(';');
    let mime = params.next().unwrap_or("").trim();
    if !mime.eq_ignore_ascii_case("multipart/form-data") {
        return Err(AnalysisError::invalid_request(format!(
            "expected multipart/form-data, got '{mime}'"
        )));
    }
    params
        .filter_map(|p| p.split_once('='))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("boundary"))
        .map(|(_, v)| v.trim().trim_matches('"').to_string())
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AnalysisError::invalid_request("multipart content type without boundary"))
}

fn parse_part(headers: &str, data: &[u8]) -> Result<FormPart, AnalysisError> {
    let mut name = None;
    let mut filename = None;
    let mut content_type = None;
    for line in headers.split("\r\n") {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.eq_ignore_ascii_case("content-disposition") {
            for param in value.split(';').skip(1) {
                let Some((k, v)) = param.split_once('=') else {
                    continue;
                };
                let v = v.trim().trim_matches('"').to_string();
                match k.trim().to_ascii_lowercase().as_str() {
                    "name" => name = Some(v),
                    "filename" => filename = Some(v),
                    _ => {}
                }
            }
        } else if key.eq_ignore_ascii_case("content-type") {
            let v = value.trim();
            if v.to_ascii_lowercase().starts_with("multipart/") {
                return Err(AnalysisError::invalid_request("nested multipart is not supported"));
            }
            content_type = Some(v.to_string());
        } else if key.eq_ignore_ascii_case("content-transfer-encoding") {
            return Err(AnalysisError::invalid_request(
                "content-transfer-encoding is not supported",
            ));
        }
    }
    let name = name.ok_or_else(|| AnalysisError::invalid_request("multipart part without name"))?;
    Ok(FormPart {
        name,
        filename,
        content_type,
        data: data.to_vec(),
    })
}

fn line_break_len(rest: &[u8]) -> usize {
    if rest.starts_with(b"\r\n") {
        2
    } else if rest.starts_with(b"\n") {
        1
    } else {
        0
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(boundary: &str) -> Vec<u8> {
        let mut b = Vec::new();
        b.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        b.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image_data\"; filename=\"f.png\"\r\n",
        );
        b.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        b.extend_from_slice(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x00]);
        b.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
        b.extend_from_slice(b"Content-Disposition: form-data; name=\"image_type\"\r\n\r\n");
        b.extend_from_slice(b"raw");
        b.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        b
    }

    #[test]
    fn parses_file_and_text_fields() {
        let form =
            MultipartForm::parse("multipart/form-data; boundary=\"xYz\"", &body("xYz")).unwrap();
        assert_eq!(form.parts.len(), 2);
        let file = form.part("image_data").unwrap();
        assert_eq!(file.filename.as_deref(), Some("f.png"));
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(file.data, vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x00]);
        assert_eq!(form.text("image_type").unwrap(), Some("raw"));
        assert_eq!(form.text("hand").unwrap(), None);
    }

    #[test]
    fn rejects_missing_boundary() {
        let err = MultipartForm::parse("multipart/form-data", b"").unwrap_err();
        assert_eq!(err.kind(), "InvalidRequestError");
        let err = MultipartForm::parse("application/json", b"{}").unwrap_err();
        assert_eq!(err.kind(), "InvalidRequestError");
    }

    #[test]
    fn rejects_unterminated_part() {
        let mut b = body("abc");
        b.truncate(b.len() - 12);
        assert!(MultipartForm::parse("multipart/form-data; boundary=abc", &b).is_err());
    }
}
