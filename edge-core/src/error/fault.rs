// Edge fault bodies
//
// Edge reports failures as `{"code": "...", "message": "...", "contexts": []}`.
// Older endpoints nest the same pair under `fault.faultstring` / `fault.detail.errorcode`.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EdgeFault {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct LegacyFault {
    fault: LegacyFaultBody,
}

#[derive(Deserialize)]
struct LegacyFaultBody {
    faultstring: Option<String>,
    detail: Option<LegacyFaultDetail>,
}

#[derive(Deserialize)]
struct LegacyFaultDetail {
    errorcode: Option<String>,
}

impl EdgeFault {
    /// Human readable summary, preferring the message over the code
    pub fn describe(&self) -> Option<String> {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => Some(format!("{} ({})", message, code)),
            (None, Some(message)) => Some(message.clone()),
            (Some(code), None) => Some(code.clone()),
            (None, None) => None,
        }
    }
}

/// Parse an Edge error body. Returns `None` for empty or non-JSON bodies.
pub fn parse_fault(body: &str) -> Option<EdgeFault> {
    if let Ok(legacy) = serde_json::from_str::<LegacyFault>(body) {
        return Some(EdgeFault {
            code: legacy.fault.detail.and_then(|d| d.errorcode),
            message: legacy.fault.faultstring,
        });
    }

    serde_json::from_str::<EdgeFault>(body)
        .ok()
        .filter(|fault| fault.code.is_some() || fault.message.is_some())
}

/// Describe a failed response for an error message: the parsed fault when
/// there is one, otherwise the HTTP status line.
pub fn describe_failure(status: u16, body: &str) -> String {
    parse_fault(body)
        .and_then(|fault| fault.describe())
        .unwrap_or_else(|| format!("unexpected HTTP status {}", status))
}
