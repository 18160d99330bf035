// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `multiply` handler: `{"x": 3, "y": 4}` -> `12`.

use std::fmt;

use serde::Deserialize;
use serde_json::Number;

use crate::error::HandlerError;

/// Request body for `multiply`.
#[derive(Debug, Clone, Deserialize)]
pub struct MultiplyRequest {
    pub x: Number,
    pub y: Number,
}

impl MultiplyRequest {
    /// Parse a JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, HandlerError> {
        serde_json::from_slice(body).map_err(|e| HandlerError::InvalidBody {
            message: e.to_string(),
        })
    }
}

/// Product of two JSON numbers. Integer operands stay integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Product {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::Integer(n) => write!(f, "{}", n),
            Product::Float(v) => write_float(f, *v),
        }
    }
}

/// Scientific notation outside `1e-4 <= |v| < 1e16`, with a signed exponent
/// of at least two digits. Whole floats keep a trailing ".0".
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }

    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", v);
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    if v.fract() == 0.0 {
        write!(f, "{:.1}", v)
    } else {
        write!(f, "{}", v)
    }
}

/// Multiply the two operands.
pub fn multiply(request: &MultiplyRequest) -> Product {
    if let (Some(x), Some(y)) = (request.x.as_i64(), request.y.as_i64()) {
        if let Some(product) = x.checked_mul(y) {
            return Product::Integer(product);
        }
    }

    let x = request.x.as_f64().unwrap_or(f64::NAN);
    let y = request.y.as_f64().unwrap_or(f64::NAN);
    Product::Float(x * y)
}

/// HTTP entry point.
pub async fn handle(body: axum::body::Bytes) -> Result<String, HandlerError> {
    let request = MultiplyRequest::from_json(&body)?;
    let product = multiply(&request);

    tracing::debug!(x = %request.x, y = %request.y, product = %product, "Multiplied");

    Ok(product.to_string())
}
