use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root-finding method selected by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Newton-Raphson from the starting point.
    #[serde(alias = "Newton-Raphson")]
    Newton,

    /// Brent root with a traced bisection over the found bracket.
    #[default]
    #[serde(alias = "biseccion", alias = "bisección", alias = "brent")]
    Bisection,
}

impl Method {
    /// Returns the lowercase name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newton => "newton",
            Self::Bisection => "bisection",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method {0:?}; expected \"Newton-Raphson\", \"newton\" or \"bisection\"")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    /// Parses a method name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newton-raphson" | "newton" => Ok(Self::Newton),
            "bisection" | "biseccion" | "bisección" | "brent" => Ok(Self::Bisection),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}
