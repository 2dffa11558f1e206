use mime::Mime;

/// Status of an export response. `Forbidden` mirrors an HTTP 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    Forbidden,
}

impl ResponseStatus {
    pub fn as_u16(self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::Forbidden => 403,
        }
    }
}

/// HTTP-shaped response handed back to the host framework.
#[derive(Debug, Clone)]
pub struct ExportResponse {
    pub status: ResponseStatus,
    pub content_type: Mime,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl ExportResponse {
    /// A 200 response carrying a CSV attachment.
    pub fn csv_attachment(filename: &str, body: Vec<u8>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            content_type: mime::TEXT_CSV,
            content_disposition: Some(format!("attachment; filename={}", filename)),
            body,
        }
    }

    /// A 403 response with an empty body.
    pub fn forbidden() -> Self {
        Self {
            status: ResponseStatus::Forbidden,
            content_type: mime::TEXT_PLAIN,
            content_disposition: None,
            body: Vec::new(),
        }
    }

    pub fn is_forbidden(&self) -> bool {
        self.status == ResponseStatus::Forbidden
    }

    /// Body as UTF-8 text. Export bodies are always valid UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
