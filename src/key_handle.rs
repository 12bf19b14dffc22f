use std::fmt::{self, Debug};
use std::result::Result;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;

use crate::constants::MAX_KEY_HANDLE_LEN;
use crate::serde_base64::{from_base64, to_base64};

/// Opaque reference issued at registration time and presented back at
/// authentication time to identify which key to use. The device only ever
/// accepts a handle together with the application id it was issued for.
#[derive(Clone, Eq, PartialEq)]
pub struct KeyHandle(Vec<u8>);

impl KeyHandle {
    pub fn from(bytes: &[u8]) -> KeyHandle {
        assert!(bytes.len() <= MAX_KEY_HANDLE_LEN);
        KeyHandle(bytes.to_vec())
    }

    pub(crate) fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> KeyHandle {
        let mut bytes = vec![0u8; MAX_KEY_HANDLE_LEN];
        rng.fill_bytes(&mut bytes);
        KeyHandle(bytes)
    }

    pub fn eq_consttime(&self, other: &KeyHandle) -> bool {
        self.0.len() == other.0.len() && self.0.ct_eq(&other.0).unwrap_u8() == 1
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for KeyHandle {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "KeyHandle")
    }
}

impl Serialize for KeyHandle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        to_base64(&self, serializer)
    }
}

impl<'de> Deserialize<'de> for KeyHandle {
    fn deserialize<D>(deserializer: D) -> Result<KeyHandle, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let bytes = from_base64(deserializer)?;
        if bytes.len() > MAX_KEY_HANDLE_LEN {
            return Err(D::Error::custom("key handle too long"));
        }
        Ok(KeyHandle(bytes))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::OsRng;

    use super::*;

    #[test]
    fn generate_makes_max_length_handles() {
        let handle = KeyHandle::generate(&mut OsRng);
        assert_eq!(handle.len(), MAX_KEY_HANDLE_LEN);
        assert!(!handle.is_empty());
    }

    #[test]
    fn eq_consttime_differs_on_length_and_content() {
        let a = KeyHandle::from(&[1u8, 2, 3]);
        let b = KeyHandle::from(&[1u8, 2, 3]);
        let c = KeyHandle::from(&[1u8, 2, 4]);
        let d = KeyHandle::from(&[1u8, 2]);
        assert!(a.eq_consttime(&b));
        assert!(!a.eq_consttime(&c));
        assert!(!a.eq_consttime(&d));
    }
}
