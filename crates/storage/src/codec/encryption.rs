//! AES-128-CBC encryption stage.
//!
//! ## Format
//!
//! ```text
//! [iv: 16 bytes][ciphertext: PKCS#7 padded, multiple of 16 bytes]
//! ```
//!
//! A fresh random IV is drawn for every encode, so encoding the same
//! plaintext twice yields different ciphertexts.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

use super::traits::{CodecError, StorageCodec};

/// Required key length in bytes
pub const KEY_LENGTH: usize = 16;

/// IV length in bytes (one AES block)
pub const IV_LENGTH: usize = 16;

const CODEC_ID: &str = "aes-128-cbc";

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Symmetric encryption with AES-128 in CBC mode
#[derive(Clone)]
pub struct Aes128CbcCodec {
    key: [u8; KEY_LENGTH],
}

impl Aes128CbcCodec {
    /// Create a codec from a 16-byte key
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidKeyLength` for any other key length.
    pub fn new(key: &[u8]) -> Result<Self, CodecError> {
        let key: [u8; KEY_LENGTH] = key.try_into().map_err(|_| CodecError::InvalidKeyLength {
            expected: KEY_LENGTH,
            actual: key.len(),
        })?;
        Ok(Self { key })
    }
}

impl std::fmt::Debug for Aes128CbcCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aes128CbcCodec")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl StorageCodec for Aes128CbcCodec {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut iv = [0u8; IV_LENGTH];
        rand::thread_rng().fill_bytes(&mut iv);

        let cipher = Aes128CbcEnc::new_from_slices(&self.key, &iv)
            .map_err(|e| CodecError::encode(e.to_string(), CODEC_ID))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(data);

        let mut out = Vec::with_capacity(IV_LENGTH + ciphertext.len());
        out.extend_from_slice(&iv);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        if data.len() < IV_LENGTH {
            return Err(CodecError::decode(
                "input shorter than initialization vector",
                CODEC_ID,
                data.len(),
            ));
        }

        let (iv, ciphertext) = data.split_at(IV_LENGTH);
        let cipher = Aes128CbcDec::new_from_slices(&self.key, iv)
            .map_err(|e| CodecError::decode(e.to_string(), CODEC_ID, data.len()))?;

        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|e| CodecError::decode(e.to_string(), CODEC_ID, data.len()))
    }

    fn codec_id(&self) -> &str {
        CODEC_ID
    }
}
