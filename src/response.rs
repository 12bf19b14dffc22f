use byteorder::{BigEndian, WriteBytesExt};

use crate::attestation::AttestationCertificate;
use crate::constants::*;
use crate::key_handle::KeyHandle;
use crate::request::DecodeError;

use super::user_presence_byte;
use super::Counter;
use super::Signature;
use super::StatusCode;

pub enum Response {
    Registration {
        user_public_key: Vec<u8>,
        key_handle: KeyHandle,
        attestation_certificate: AttestationCertificate,
        signature: Box<dyn Signature>,
    },
    Authentication {
        counter: Counter,
        signature: Box<dyn Signature>,
        user_present: bool,
    },
    Version {
        version_string: String,
    },
    TestOfUserPresenceNotSatisfied,
    InvalidKeyHandle,
    WrongLength,
    UnsupportedClass,
    UnsupportedInstruction,
    OutOfMemory,
    UnknownError,
}

impl Response {
    /// Serializes the response body followed by the 2-byte status word.
    ///
    /// Size limits on the variable-length fields are contract preconditions
    /// of the building code, not conditions this encoder reports to hosts.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = Vec::new();
        match self {
            Response::Registration {
                user_public_key,
                key_handle,
                attestation_certificate,
                signature,
            } => {
                debug_assert_eq!(user_public_key.len(), EC_POINT_LEN);
                debug_assert!(key_handle.len() <= MAX_KEY_HANDLE_LEN);
                debug_assert!(signature.as_ref().as_ref().len() <= MAX_SIGNATURE_LEN);

                // reserved byte [1 byte], which for legacy reasons has the value 0x05.
                bytes.push(REGISTER_ID);

                // user public key [65 bytes]. This is the (uncompressed) x,y-representation of a curve point on the P-256 NIST elliptic curve.
                bytes.extend_from_slice(&user_public_key);

                // key handle length byte [1 byte], which specifies the length of the key handle (see below). The value is unsigned (range 0-255).
                let key_handle_bytes = key_handle.as_ref();
                bytes.push(key_handle_bytes.len() as u8);

                // A key handle [length specified in previous field].
                bytes.extend_from_slice(key_handle_bytes);

                // An attestation certificate [variable length]. This is a certificate in X.509 DER format
                let certificate_der = attestation_certificate.to_der();
                debug_assert!(certificate_der.len() <= MAX_ATT_CERT_LEN);
                bytes.extend_from_slice(&certificate_der);

                // A signature [variable length, DER-encoded]
                let signature_bytes = signature.as_ref().as_ref();
                bytes.extend_from_slice(signature_bytes);

                // Status word [2 bytes]
                StatusCode::NoError.write(&mut bytes);
            }
            Response::Authentication {
                counter,
                signature,
                user_present,
            } => {
                debug_assert!(signature.as_ref().as_ref().len() <= MAX_SIGNATURE_LEN);

                let user_presence_byte = user_presence_byte(user_present);

                // A user presence byte [1 byte].
                bytes.push(user_presence_byte);

                // A counter [4 bytes, big-endian].
                bytes.write_u32::<BigEndian>(counter).unwrap();

                // A signature [variable length, DER-encoded]
                bytes.extend_from_slice(signature.as_ref().as_ref());

                // Status word [2 bytes]
                StatusCode::NoError.write(&mut bytes);
            }
            Response::Version { version_string } => {
                // The response message's raw representation is the
                // ASCII representation of the string 'U2F_V2'
                // (without quotes, and without any NUL terminator).
                bytes.extend_from_slice(version_string.as_bytes());

                // Status word [2 bytes]
                StatusCode::NoError.write(&mut bytes);
            }
            Response::TestOfUserPresenceNotSatisfied => {
                // Status word [2 bytes]
                StatusCode::TestOfUserPresenceNotSatisfied.write(&mut bytes);
            }
            Response::InvalidKeyHandle => {
                // Status word [2 bytes]
                StatusCode::InvalidKeyHandle.write(&mut bytes);
            }
            Response::WrongLength => {
                // Status word [2 bytes]
                StatusCode::RequestLengthInvalid.write(&mut bytes);
            }
            Response::UnsupportedClass => {
                // Status word [2 bytes]
                StatusCode::RequestClassNotSupported.write(&mut bytes);
            }
            Response::UnsupportedInstruction => {
                // Status word [2 bytes]
                StatusCode::RequestInstructionNotSupported.write(&mut bytes);
            }
            Response::OutOfMemory => {
                // Status word [2 bytes]
                StatusCode::VendorOutOfMemory.write(&mut bytes);
            }
            Response::UnknownError => {
                // Status word [2 bytes]
                StatusCode::UnknownError.write(&mut bytes);
            }
        }
        bytes
    }
}

/// Every way a request can fail to decode has exactly one status word.
impl From<DecodeError> for Response {
    fn from(err: DecodeError) -> Response {
        match err {
            DecodeError::Truncated
            | DecodeError::TrailingBytes
            | DecodeError::LengthOutOfRange
            | DecodeError::UnsupportedEncoding => Response::WrongLength,
            DecodeError::UnsupportedClass(_) => Response::UnsupportedClass,
            DecodeError::UnsupportedCommand(_) => Response::UnsupportedInstruction,
            DecodeError::UnsupportedControlCode(_) => Response::UnsupportedInstruction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_word(bytes: &[u8]) -> u16 {
        let len = bytes.len();
        u16::from_be_bytes([bytes[len - 2], bytes[len - 1]])
    }

    #[test]
    fn version_response_is_ascii_literal_plus_status() {
        let bytes = Response::Version {
            version_string: String::from(VERSION_STRING),
        }
        .into_bytes();
        assert_eq!(&bytes[..6], b"U2F_V2");
        assert_eq!(status_word(&bytes), SW_NO_ERROR);
        assert_eq!(bytes.len(), 8);
    }

    #[test]
    fn status_only_responses() {
        let cases: Vec<(Response, u16)> = vec![
            (
                Response::TestOfUserPresenceNotSatisfied,
                SW_CONDITIONS_NOT_SATISFIED,
            ),
            (Response::InvalidKeyHandle, SW_WRONG_DATA),
            (Response::WrongLength, SW_WRONG_LENGTH),
            (Response::UnsupportedClass, SW_CLA_NOT_SUPPORTED),
            (Response::UnsupportedInstruction, SW_INS_NOT_SUPPORTED),
            (Response::OutOfMemory, SW_VENDOR_NOMEM),
            (Response::UnknownError, SW_UNKNOWN),
        ];
        for (response, expected) in cases {
            let bytes = response.into_bytes();
            assert_eq!(bytes.len(), 2);
            assert_eq!(status_word(&bytes), expected);
        }
    }

    #[test]
    fn decode_errors_map_to_status_words() {
        let bytes = Response::from(DecodeError::LengthOutOfRange).into_bytes();
        assert_eq!(status_word(&bytes), SW_WRONG_LENGTH);

        let bytes = Response::from(DecodeError::UnsupportedCommand(0xc0)).into_bytes();
        assert_eq!(status_word(&bytes), SW_INS_NOT_SUPPORTED);

        let bytes = Response::from(DecodeError::UnsupportedClass(0x80)).into_bytes();
        assert_eq!(status_word(&bytes), SW_CLA_NOT_SUPPORTED);
    }
}
