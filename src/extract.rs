//! Locates the assistant text inside a Cohere chat reply.
//!
//! The vendor reply is treated as untrusted JSON: every field is optional and
//! any field may carry an unexpected type. Decoding never fails; a reply that
//! matches no known shape decodes to [`ReplyShape::Unrecognized`].

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::MapAccessDeserializer;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::RelayError;

pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response at this time.";
pub const UNKNOWN_ERROR: &str = "Unknown error";

const ERROR_FINISH_REASON: &str = "error";

/// Outcome of decoding a chat reply, in the order the shapes are tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyShape {
    /// `message.content[0].text`
    Message(String),
    /// `output[0].content[0].text`
    Output(String),
    /// No text and `finish_reason == "error"`.
    Failed { message: String },
    Unrecognized,
}

/// A field that decodes to `Unknown` instead of failing when its JSON type is unexpected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Known(T),
    Unknown(IgnoredAny),
}

impl<T> Lenient<T> {
    fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown(_) => None,
        }
    }
}

/// A struct that only decodes from a JSON object.
///
/// Derived struct impls also accept arrays positionally, which would read
/// `["hi"]` as if it carried a `text` key.
struct Record<T>(T);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Record<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for RecordVisitor<T> {
            type Value = Record<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                T::deserialize(MapAccessDeserializer::new(map)).map(Record)
            }
        }

        deserializer.deserialize_map(RecordVisitor(PhantomData))
    }
}

type Parts = Option<Lenient<Vec<Lenient<Record<ContentPart>>>>>;

#[derive(Deserialize)]
struct ChatEnvelope {
    message: Option<Lenient<Record<MessageBody>>>,
    output: Option<Lenient<Vec<Lenient<Record<OutputItem>>>>>,
    finish_reason: Option<Lenient<String>>,
}

#[derive(Deserialize)]
struct MessageBody {
    content: Parts,
}

#[derive(Deserialize)]
struct OutputItem {
    content: Parts,
}

#[derive(Deserialize)]
struct ContentPart {
    text: Option<Lenient<String>>,
}

fn first_text(parts: &Parts) -> Option<&str> {
    let Record(part) = parts.as_ref()?.known()?.first()?.known()?;
    part.text
        .as_ref()?
        .known()
        .map(String::as_str)
        .filter(|text| !text.is_empty())
}

impl ChatEnvelope {
    fn message_text(&self) -> Option<&str> {
        let Record(body) = self.message.as_ref()?.known()?;
        first_text(&body.content)
    }

    fn output_text(&self) -> Option<&str> {
        let Record(item) = self.output.as_ref()?.known()?.first()?.known()?;
        first_text(&item.content)
    }

    fn finished_with_error(&self) -> bool {
        self.finish_reason
            .as_ref()
            .and_then(Lenient::known)
            .is_some_and(|reason| reason == ERROR_FINISH_REASON)
    }
}

impl ReplyShape {
    pub fn decode(response: &Value) -> Self {
        let Ok(Record(envelope)) = Record::<ChatEnvelope>::deserialize(response) else {
            return Self::Unrecognized;
        };

        if let Some(text) = envelope.message_text() {
            return Self::Message(text.to_string());
        }
        if let Some(text) = envelope.output_text() {
            return Self::Output(text.to_string());
        }
        if envelope.finished_with_error() {
            return Self::Failed {
                message: vendor_message(response),
            };
        }
        Self::Unrecognized
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Message(text) | Self::Output(text) => Some(text),
            Self::Failed { .. } | Self::Unrecognized => None,
        }
    }
}

fn vendor_message(response: &Value) -> String {
    match response.get("message") {
        Some(Value::String(message)) => message.clone(),
        None | Some(Value::Null) => UNKNOWN_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Server policy: an upstream failure is an error, any other miss becomes [`FALLBACK_REPLY`].
pub fn extract_reply(response: &Value) -> Result<String, RelayError> {
    match ReplyShape::decode(response) {
        ReplyShape::Message(text) | ReplyShape::Output(text) => Ok(text),
        ReplyShape::Failed { message } => Err(RelayError::Upstream { message }),
        ReplyShape::Unrecognized => Ok(FALLBACK_REPLY.to_string()),
    }
}

/// CLI policy: any miss echoes the raw reply as compact JSON.
pub fn extract_reply_or_raw(response: &Value) -> String {
    ReplyShape::decode(response)
        .text()
        .map_or_else(|| response.to_string(), str::to_string)
}
