use serde::Deserialize;

use super::{Method, SolveError};

/// A number sent either as JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn parse(&self, field: &str) -> Result<f64, SolveError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().map_err(|_| {
                SolveError::InvalidRequest(format!("`{field}` is not a number: {text:?}"))
            })?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SolveError::InvalidRequest(format!(
                "`{field}` must be finite, got {value}"
            )))
        }
    }
}

/// Body of a solve request, as received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SolvePayload {
    pub funcion: Option<String>,
    pub x0: Option<NumberOrText>,
    pub tolerancia: Option<NumberOrText>,
    pub metodo: Option<String>,
    pub comparar: Option<bool>,
}

/// A validated solve request.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveRequest {
    pub expression: String,
    pub x0: f64,
    /// Always finite and positive.
    pub tolerance: f64,
    pub method: Method,
    pub compare: bool,
}

impl TryFrom<SolvePayload> for SolveRequest {
    type Error = SolveError;

    fn try_from(payload: SolvePayload) -> Result<Self, Self::Error> {
        let expression = payload.funcion.ok_or_else(|| missing("funcion"))?;
        let x0 = payload.x0.ok_or_else(|| missing("x0"))?.parse("x0")?;
        let tolerance = payload
            .tolerancia
            .ok_or_else(|| missing("tolerancia"))?
            .parse("tolerancia")?;
        if tolerance <= 0.0 {
            return Err(SolveError::InvalidRequest(format!(
                "`tolerancia` must be positive, got {tolerance}"
            )));
        }
        let method = match payload.metodo {
            Some(name) => name.parse()?,
            None => Method::default(),
        };

        Ok(Self {
            expression,
            x0,
            tolerance,
            method,
            compare: payload.comparar.unwrap_or_default(),
        })
    }
}

fn missing(field: &str) -> SolveError {
    SolveError::InvalidRequest(format!("missing field `{field}`"))
}
