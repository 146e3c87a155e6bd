//! Ordered composition of byte codecs.

use super::traits::{CodecError, StorageCodec};

/// Ordered list of codec stages
///
/// Encode applies each stage in insertion order; decode applies them in
/// reverse. An empty chain is the identity transform.
#[derive(Debug, Default)]
pub struct CodecChain {
    stages: Vec<Box<dyn StorageCodec>>,
    id: String,
}

impl CodecChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            id: "identity".to_string(),
        }
    }

    /// Append a stage (builder style)
    pub fn with_stage(mut self, stage: Box<dyn StorageCodec>) -> Self {
        self.stages.push(stage);
        self.id = self
            .stages
            .iter()
            .map(|s| s.codec_id())
            .collect::<Vec<_>>()
            .join("+");
        self
    }

    /// True when no byte transform is applied
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }
}

impl StorageCodec for CodecChain {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut buf = data.to_vec();
        for stage in &self.stages {
            buf = stage.encode(&buf)?;
        }
        Ok(buf)
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut buf = data.to_vec();
        for stage in self.stages.iter().rev() {
            buf = stage.decode(&buf)?;
        }
        Ok(buf)
    }

    fn codec_id(&self) -> &str {
        if self.id.is_empty() {
            "identity"
        } else {
            &self.id
        }
    }
}
