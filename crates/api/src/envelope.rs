//! Uniform result envelope returned by every dispatched request.
//!
//! Every handled request answers `200 OK` at the HTTP level with this
//! envelope as the body; the business outcome lives in `code`/`msg`.
//! `code` is rendered as a numeric string and `used` is the elapsed
//! time from envelope creation to serialization, in fractional
//! milliseconds. The `data` field is omitted entirely when no payload
//! was attached.

use std::time::Instant;

use serde::Serialize;

use inkpress_core::status::{codes, messages};

/// Mutable per-request result, created at the start of the business
/// phase and serialized exactly once into the response body.
#[derive(Debug)]
pub struct Envelope {
    code: i32,
    msg: String,
    data: Option<serde_json::Value>,
    created: Instant,
}

/// Serialized view of an [`Envelope`].
#[derive(Serialize)]
struct EnvelopeBody<'a> {
    code: String,
    msg: &'a str,
    used: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
}

impl Envelope {
    /// New envelope in the default "ok" state, capturing creation time.
    pub fn new() -> Self {
        Self {
            code: codes::OK,
            msg: messages::OK.to_string(),
            data: None,
            created: Instant::now(),
        }
    }

    /// Set the final business code and message.
    pub fn set_result(&mut self, code: i32, msg: impl Into<String>) {
        self.code = code;
        self.msg = msg.into();
    }

    /// Attach a structured payload.
    pub fn set_data(&mut self, data: serde_json::Value) {
        self.data = Some(data);
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Serialize to the response body JSON.
    pub fn to_json_string(&self) -> String {
        let body = EnvelopeBody {
            code: self.code.to_string(),
            msg: &self.msg,
            used: self.created.elapsed().as_secs_f64() * 1000.0,
            data: self.data.as_ref(),
        };
        serde_json::to_string(&body).expect("envelope body is always serializable")
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_serializes_as_numeric_string() {
        let mut env = Envelope::new();
        env.set_result(codes::NOT_LOGIN, messages::NOT_LOGIN);
        let v: serde_json::Value = serde_json::from_str(&env.to_json_string()).unwrap();
        assert_eq!(v["code"], "410");
        assert_eq!(v["msg"], "not login");
    }

    #[test]
    fn data_omitted_when_absent() {
        let env = Envelope::new();
        let v: serde_json::Value = serde_json::from_str(&env.to_json_string()).unwrap();
        assert!(v.get("data").is_none());
        assert_eq!(v["code"], "200");
    }

    #[test]
    fn data_present_when_attached() {
        let mut env = Envelope::new();
        env.set_data(serde_json::json!({ "answer": 42 }));
        let v: serde_json::Value = serde_json::from_str(&env.to_json_string()).unwrap();
        assert_eq!(v["data"]["answer"], 42);
    }

    #[test]
    fn used_is_nonnegative_and_grows() {
        let env = Envelope::new();
        let v1: serde_json::Value = serde_json::from_str(&env.to_json_string()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let v2: serde_json::Value = serde_json::from_str(&env.to_json_string()).unwrap();
        let u1 = v1["used"].as_f64().unwrap();
        let u2 = v2["used"].as_f64().unwrap();
        assert!(u1 >= 0.0);
        assert!(u2 > u1);
    }

    #[test]
    fn set_result_overwrites_both_fields() {
        let mut env = Envelope::new();
        env.set_result(codes::INVALID_METHOD, messages::INVALID_METHOD);
        assert_eq!(env.code(), 300);
        assert_eq!(env.msg(), "invalid method");
    }
}
