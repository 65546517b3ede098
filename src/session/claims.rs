use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde_json::Value;

/// Expiry values above this are milliseconds. 10^12 seconds is far beyond
/// any real expiry, 10^12 milliseconds is September 2001.
const MILLIS_THRESHOLD: f64 = 1e12;

/// Decode the claims segment of a JWT without verifying the signature.
/// Issuers mix URL-safe and standard base64, padded and not, so the
/// alphabet is normalized before decoding.
pub fn decode_payload(token: &str) -> Result<Value> {
    let payload = match token.split('.').nth(1) {
        Some(payload) if !payload.is_empty() => payload,
        _ => bail!("invalid token, missing payload segment"),
    };

    let normalized: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    let normalized = normalized.trim_end_matches('=');

    let data = STANDARD_NO_PAD
        .decode(normalized)
        .context("decode token payload base64")?;
    let value: Value = serde_json::from_slice(&data).context("parse token payload json")?;
    if !value.is_object() {
        bail!("token payload is not an object");
    }
    Ok(value)
}

/// The `exp` claim in epoch seconds. Accepts numbers and numeric strings,
/// normalizes milliseconds, answers None for anything else.
pub fn expiry_epoch(payload: &Value) -> Option<f64> {
    let exp = match payload.get("exp") {
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !exp.is_finite() || exp <= 0.0 {
        return None;
    }

    if exp > MILLIS_THRESHOLD {
        Some((exp / 1000.0).floor())
    } else {
        Some(exp)
    }
}

/// Like [`expiry_epoch`], truncated for display.
pub fn expiry_seconds(payload: &Value) -> Option<u64> {
    expiry_epoch(payload).map(|exp| exp as u64)
}

/// Whether the token expires strictly after `now`. Any decode failure
/// means dead.
pub fn is_live(token: &str, now: u64) -> bool {
    let payload = match decode_payload(token) {
        Ok(payload) => payload,
        Err(_) => return false,
    };
    match expiry_epoch(&payload) {
        Some(exp) => exp > now as f64,
        None => false,
    }
}
