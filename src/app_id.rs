use std::fmt;
use std::result::Result;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::APP_ID_LEN;
use crate::serde_base64::{from_base64, to_base64};

/// SHA-256 hash of the application identity a credential is bound to,
/// called the "application parameter" in the raw message format.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct AppId(pub(crate) [u8; APP_ID_LEN]);

impl AppId {
    pub fn from_bytes(slice: &[u8]) -> AppId {
        assert_eq!(slice.len(), APP_ID_LEN);
        let mut bytes = [0u8; APP_ID_LEN];
        bytes.copy_from_slice(slice);
        AppId(bytes)
    }
}

impl AsRef<[u8]> for AppId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode_upper(self.0))
    }
}

impl Serialize for AppId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        to_base64(&self, serializer)
    }
}

impl<'de> Deserialize<'de> for AppId {
    fn deserialize<D>(deserializer: D) -> Result<AppId, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let decoded = from_base64(deserializer)?;
        if decoded.len() != APP_ID_LEN {
            return Err(D::Error::custom("expected 32 bytes"));
        }
        let mut bytes = [0u8; APP_ID_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(AppId(bytes))
    }
}
