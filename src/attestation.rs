use std::fmt::{self, Debug};

use openssl::x509::X509;

use crate::private_key::PrivateKey;

/// Device attestation material: the certificate sent in registration
/// responses and the key that signs registration payloads. Separate from the
/// per-application key pairs.
pub struct Attestation {
    pub certificate: AttestationCertificate,
    pub key: PrivateKey,
}

#[derive(Clone)]
pub struct AttestationCertificate(pub(crate) X509);

impl AttestationCertificate {
    pub fn from_pem(pem: &str) -> AttestationCertificate {
        AttestationCertificate(X509::from_pem(pem.as_bytes()).unwrap())
    }

    pub fn to_der(&self) -> Vec<u8> {
        self.0.to_der().unwrap()
    }
}

impl Debug for AttestationCertificate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AttestationCertificate")
    }
}
