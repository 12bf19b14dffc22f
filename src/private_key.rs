use std::fmt::{self, Debug};
use std::result::Result;

use openssl::ec::EcKey;
use openssl::error::ErrorStack;
use openssl::pkey::Private;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

use crate::serde_base64::{from_base64, to_base64};

/// P-256 signing key, persisted as base64-wrapped PEM.
pub struct PrivateKey(pub(crate) EcKey<Private>);

impl PrivateKey {
    pub fn from_pem(pem: &str) -> Result<PrivateKey, ErrorStack> {
        Ok(PrivateKey(EcKey::private_key_from_pem(pem.as_bytes())?))
    }

    fn to_pem(&self) -> Result<Vec<u8>, ErrorStack> {
        self.0.private_key_to_pem()
    }
}

impl Clone for PrivateKey {
    fn clone(&self) -> PrivateKey {
        PrivateKey(self.0.to_owned())
    }
}

// Key material stays out of logs.
impl Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PrivateKey")
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let pem = self.to_pem().map_err(ser::Error::custom)?;
        to_base64(&pem, serializer)
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<PrivateKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pem = from_base64(deserializer)?;
        let key = EcKey::private_key_from_pem(&pem).map_err(de::Error::custom)?;
        Ok(PrivateKey(key))
    }
}
