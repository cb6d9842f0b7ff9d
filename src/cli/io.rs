//! JSON I/O handling for CLI
//!
//! - Input: one JSON document from a file or stdin
//! - Output: one JSON object per response line

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use super::errors::CliResult;
use crate::schema::Violation;

/// Read one JSON document from `file`, or from stdin when `None`
pub fn read_document(file: Option<&Path>) -> CliResult<Value> {
    let content = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&content)?)
}

/// Success envelope
pub fn ok_response(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope; `violations` is omitted when empty
pub fn error_response(code: &str, message: &str, violations: &[Violation]) -> Value {
    let mut response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    if !violations.is_empty() {
        response["violations"] = json!(violations);
    }
    response
}

/// Write one response line
pub fn write_json<W: Write>(out: &mut W, response: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, response)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
