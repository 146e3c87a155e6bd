//! Document codec: typed value to stored text and back.
//!
//! ```text
//! Base64: value -> JSON bytes -> chain.encode -> base64 text
//! Direct: value -> JSON bytes -> UTF-8 text
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use doclite_core::{Error, Result};

use super::chain::CodecChain;
use super::serializer::JsonSerializer;
use super::traits::StorageCodec;

/// How encoded bytes become stored text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Standard base64 of the chain output
    Base64,
    /// Serializer output stored as UTF-8; byte stages are bypassed
    Direct,
}

/// Serializes documents into the text stored under their keys
#[derive(Debug)]
pub struct DocumentCodec {
    serializer: JsonSerializer,
    chain: CodecChain,
    encoding: TextEncoding,
}

impl DocumentCodec {
    /// Create a codec over `chain` using `encoding`
    pub fn new(chain: CodecChain, encoding: TextEncoding) -> Self {
        Self {
            serializer: JsonSerializer,
            chain,
            encoding,
        }
    }

    /// Plain JSON text with no byte stages
    pub fn direct() -> Self {
        Self::new(CodecChain::new(), TextEncoding::Direct)
    }

    /// Active text encoding
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Identifier of the byte pipeline (`identity` for none)
    pub fn pipeline_id(&self) -> &str {
        match self.encoding {
            TextEncoding::Base64 => self.chain.codec_id(),
            TextEncoding::Direct => "identity",
        }
    }

    /// Encode `value` to stored text
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let bytes = self.serializer.serialize(value)?;
        match self.encoding {
            TextEncoding::Base64 => {
                let encoded = self.chain.encode(&bytes)?;
                Ok(STANDARD.encode(encoded))
            }
            TextEncoding::Direct => {
                String::from_utf8(bytes).map_err(|e| Error::SerializationError(e.to_string()))
            }
        }
    }

    /// Decode stored text back into a value
    ///
    /// Empty text, or text that is not valid base64 under the `Base64`
    /// encoding, decodes to `None`.
    pub fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Result<Option<T>> {
        if text.is_empty() {
            return Ok(None);
        }

        match self.encoding {
            TextEncoding::Base64 => {
                let raw = match STANDARD.decode(text) {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!(error = %e, len = text.len(), "Stored value is not valid base64, treating as absent");
                        return Ok(None);
                    }
                };
                if raw.is_empty() {
                    return Ok(None);
                }
                let bytes = self.chain.decode(&raw)?;
                self.serializer.deserialize(&bytes)
            }
            TextEncoding::Direct => self.serializer.deserialize(text.as_bytes()),
        }
    }
}
