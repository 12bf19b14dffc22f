use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::x509::{X509NameBuilder, X509};

use crate::attestation::{Attestation, AttestationCertificate};
use crate::private_key::PrivateKey;

/// Generates fresh self-signed attestation material, intended for
/// software tokens provisioned without a vendor-issued batch certificate.
/// Relying parties that verify attestation chains will not trust it.
pub fn self_signed_attestation() -> Attestation {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
    let ec_key = EcKey::generate(&group).unwrap();
    let pkey = PKey::from_ec_key(ec_key.clone()).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, "U2F Token Attestation")
        .unwrap();
    let name = name.build();

    let mut serial = BigNum::new().unwrap();
    serial.rand(159, MsbOption::MAYBE_ZERO, false).unwrap();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    builder
        .set_serial_number(&serial.to_asn1_integer().unwrap())
        .unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(3650).unwrap())
        .unwrap();
    builder.set_pubkey(&pkey).unwrap();
    builder.sign(&pkey, MessageDigest::sha256()).unwrap();

    Attestation {
        certificate: AttestationCertificate(builder.build()),
        key: PrivateKey(ec_key),
    }
}

#[cfg(test)]
mod tests {
    use crate::constants::MAX_ATT_CERT_LEN;

    use super::*;

    #[test]
    fn certificate_fits_in_registration_response() {
        let attestation = self_signed_attestation();
        let der = attestation.certificate.to_der();
        assert!(!der.is_empty());
        assert!(der.len() <= MAX_ATT_CERT_LEN);
    }
}
