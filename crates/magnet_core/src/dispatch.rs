use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

pub const STATUS_SUCCESS: &str = "success";

/// The "is this a series" flag as it crosses the templating boundary.
///
/// Pages render it as `"True"`/`"False"` text; the backend also accepts real
/// booleans. Text is true only when it equals `true` ignoring ASCII case, so
/// `"False"` never becomes truthy by accident. Always serialized as a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesFlag(bool);

impl SeriesFlag {
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    /// Case-insensitive `true` is a series; anything else, including padded text, is not.
    pub fn parse(raw: &str) -> Self {
        Self(raw.eq_ignore_ascii_case("true"))
    }

    pub fn is_series(self) -> bool {
        self.0
    }
}

impl From<bool> for SeriesFlag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl FromStr for SeriesFlag {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

impl Serialize for SeriesFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for SeriesFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagVisitor;

        impl Visitor<'_> for FlagVisitor {
            type Value = SeriesFlag;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or a \"True\"/\"False\" string")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<SeriesFlag, E> {
                Ok(SeriesFlag(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<SeriesFlag, E> {
                Ok(SeriesFlag::parse(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<SeriesFlag, E> {
                Ok(SeriesFlag(value != 0))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<SeriesFlag, E> {
                Ok(SeriesFlag(value != 0))
            }

            fn visit_unit<E: de::Error>(self) -> Result<SeriesFlag, E> {
                Ok(SeriesFlag(false))
            }

            fn visit_none<E: de::Error>(self) -> Result<SeriesFlag, E> {
                Ok(SeriesFlag(false))
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

/// Body of `POST /send_to_qb`.
///
/// `season` and `item_title` only exist for series; the constructor drops
/// them otherwise, so the payload can never carry them for a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDispatchRequest")]
pub struct DispatchRequest {
    magnet: String,
    is_series: SeriesFlag,
    #[serde(skip_serializing_if = "Option::is_none")]
    season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    imdb_id: Option<String>,
}

impl DispatchRequest {
    pub fn new(
        magnet: impl Into<String>,
        is_series: impl Into<SeriesFlag>,
        season: Option<String>,
        item_title: Option<String>,
        imdb_id: Option<String>,
    ) -> Self {
        let is_series = is_series.into();
        let (season, item_title) = if is_series.is_series() {
            (season, item_title)
        } else {
            (None, None)
        };
        Self {
            magnet: magnet.into(),
            is_series,
            season,
            item_title,
            imdb_id,
        }
    }

    pub fn magnet(&self) -> &str {
        &self.magnet
    }

    pub fn is_series(&self) -> bool {
        self.is_series.is_series()
    }

    pub fn season(&self) -> Option<&str> {
        self.season.as_deref()
    }

    pub fn item_title(&self) -> Option<&str> {
        self.item_title.as_deref()
    }

    pub fn imdb_id(&self) -> Option<&str> {
        self.imdb_id.as_deref()
    }
}

#[derive(Deserialize)]
struct RawDispatchRequest {
    magnet: String,
    #[serde(default)]
    is_series: SeriesFlag,
    #[serde(default)]
    season: Option<String>,
    #[serde(default)]
    item_title: Option<String>,
    #[serde(default)]
    imdb_id: Option<String>,
}

impl From<RawDispatchRequest> for DispatchRequest {
    fn from(raw: RawDispatchRequest) -> Self {
        DispatchRequest::new(
            raw.magnet,
            raw.is_series,
            raw.season,
            raw.item_title,
            raw.imdb_id,
        )
    }
}

/// Response body of `POST /send_to_qb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DispatchResponse {
    pub fn success() -> Self {
        Self {
            status: STATUS_SUCCESS.to_owned(),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_owned(),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Success,
    Failure { reason: String },
}

impl From<DispatchResponse> for DispatchResult {
    fn from(response: DispatchResponse) -> Self {
        if response.status == STATUS_SUCCESS {
            return DispatchResult::Success;
        }
        let reason = response
            .message
            .unwrap_or_else(|| format!("status {}", response.status));
        DispatchResult::Failure { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_flag_parses_template_text() {
        assert!(SeriesFlag::parse("True").is_series());
        assert!(!SeriesFlag::parse(" true ").is_series());
        assert!(!SeriesFlag::parse("False").is_series());
        assert!(!SeriesFlag::parse("").is_series());
        assert!(!SeriesFlag::parse("yes").is_series());
    }

    #[test]
    fn missing_message_reports_status() {
        let result = DispatchResult::from(DispatchResponse {
            status: "busy".to_owned(),
            message: None,
        });
        assert_eq!(
            result,
            DispatchResult::Failure {
                reason: "status busy".to_owned()
            }
        );
    }
}
