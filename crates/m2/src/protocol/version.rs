use std::fmt::{Display, Formatter};
use std::str::FromStr;

use http::Version;

use crate::ensure;
use crate::protocol::ParseError;

const PREFIX: &str = "HTTP/";

/// Upper bound for either version number, anything bigger is treated as garbage.
const MAX_VERSION_NUMBER: u32 = 1_000_000;

/// The `HTTP/major.minor` version a request was made with.
///
/// Kept as plain numbers instead of [`http::Version`] so a request with an
/// unusual but well formed version still reaches the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    major: u32,
    minor: u32,
}

impl ProtocolVersion {
    pub const HTTP_10: ProtocolVersion = ProtocolVersion { major: 1, minor: 0 };
    pub const HTTP_11: ProtocolVersion = ProtocolVersion { major: 1, minor: 1 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Maps onto [`http::Version`] when the version is one it knows.
    pub fn to_http_version(self) -> Option<Version> {
        match (self.major, self.minor) {
            (0, 9) => Some(Version::HTTP_09),
            (1, 0) => Some(Version::HTTP_10),
            (1, 1) => Some(Version::HTTP_11),
            (2, 0) => Some(Version::HTTP_2),
            (3, 0) => Some(Version::HTTP_3),
            _ => None,
        }
    }
}

impl FromStr for ProtocolVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP/1.1" => return Ok(Self::HTTP_11),
            "HTTP/1.0" => return Ok(Self::HTTP_10),
            _ => {}
        }

        let (major, minor) = s
            .strip_prefix(PREFIX)
            .and_then(|numbers| numbers.split_once('.'))
            .ok_or_else(|| ParseError::invalid_protocol_version(s))?;

        Ok(Self { major: parse_number(s, major)?, minor: parse_number(s, minor)? })
    }
}

fn parse_number(version: &str, number: &str) -> Result<u32, ParseError> {
    ensure!(
        !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()),
        ParseError::invalid_protocol_version(version)
    );

    match number.parse::<u32>() {
        Ok(n) if n <= MAX_VERSION_NUMBER => Ok(n),
        _ => Err(ParseError::invalid_protocol_version(version)),
    }
}

impl Display for ProtocolVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PREFIX}{}.{}", self.major, self.minor)
    }
}
