use std::io::{Cursor, Read};
use std::result::Result;

use byteorder::{BigEndian, ReadBytesExt};
use thiserror::Error;

use crate::app_id::AppId;
use crate::constants::*;
use crate::key_handle::KeyHandle;
use crate::Challenge;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AuthenticateControlCode {
    CheckOnly,
    EnforceUserPresenceAndSign,
}

/// Structurally invalid or unsupported request bytes. Decoding fails before
/// any key material, counter, or presence collaborator is touched.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    #[error("request shorter than its fixed-size prefix")]
    Truncated,

    #[error("trailing bytes after request data")]
    TrailingBytes,

    #[error("length field out of range")]
    LengthOutOfRange,

    #[error("only extended length encoding is supported")]
    UnsupportedEncoding,

    #[error("class byte {0:#04x} is not supported")]
    UnsupportedClass(u8),

    #[error("command code {0:#04x} is not supported")]
    UnsupportedCommand(u8),

    #[error("authenticate control byte {0:#04x} is not recognized")]
    UnsupportedControlCode(u8),
}

#[derive(Debug)]
pub enum Request {
    Register {
        application: AppId,
        challenge: Challenge,
    },
    Authenticate {
        application: AppId,
        challenge: Challenge,
        control_code: AuthenticateControlCode,
        key_handle: KeyHandle,
    },
    GetVersion,
}

impl Request {
    /// Decodes a command APDU. Only supports Extended Length Encoding.
    ///
    /// Every read is bounds-checked; a malformed or adversarial buffer yields
    /// a `DecodeError`, never a panic.
    pub fn decode(data: &[u8]) -> Result<Request, DecodeError> {
        let mut reader = Cursor::new(data);

        // CLA: Reserved to be used by the underlying transport protocol
        let class_byte = read_u8(&mut reader)?;
        if class_byte != 0 {
            return Err(DecodeError::UnsupportedClass(class_byte));
        }

        // INS: U2F command code
        let command_code = read_u8(&mut reader)?;

        // P1, P2: Parameter 1 and 2, defined by each command.
        let parameter1 = read_u8(&mut reader)?;
        let _parameter2 = read_u8(&mut reader)?;

        // Extended Length Encoding
        // Always begins with a byte of value 0
        let zero_byte = read_u8(&mut reader)?;
        if zero_byte != 0 {
            return Err(DecodeError::UnsupportedEncoding);
        }

        // Nc: Length of the request-data, range 0..65 535
        // Lc: Encoding of Nc as two bytes
        // If Nc is 0, Lc is omitted (Caveat: Not all implementations respect this)
        let remaining_len = data.len() - reader.position() as usize;
        let request_data_len = match remaining_len {
            0 | 2 => {
                // Lc was omitted, there is no request data
                0
            }
            1 => return Err(DecodeError::Truncated),
            _ => {
                // Lc in big-endian order
                reader
                    .read_u16::<BigEndian>()
                    .map_err(|_| DecodeError::Truncated)? as usize
            }
        };

        // Request-data
        let mut request_data = vec![0u8; request_data_len];
        reader
            .read_exact(&mut request_data[..])
            .map_err(|_| DecodeError::Truncated)?;

        // Ne: Maximum length of the response data, range 0..65 536
        // Le: Encoding of Ne as two bytes
        // If no response data are expected, Le may be omitted.
        let remaining_len = data.len() - reader.position() as usize;
        match remaining_len {
            0 => {}
            2 => {
                // Ne is not used here; the response length is implied by the
                // command. Consume Le to confirm the framing is well-formed.
                let _max_response_data_len =
                    reader.read_u16::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
            }
            _ => return Err(DecodeError::TrailingBytes),
        }

        Self::decode_message(command_code, parameter1, &request_data)
    }

    /// Decodes a raw request-data body for the given command code and
    /// control parameter, as handed over by the transport dispatcher.
    pub fn decode_message(
        command_code: u8,
        control_parameter: u8,
        data: &[u8],
    ) -> Result<Request, DecodeError> {
        match command_code {
            REGISTER_COMMAND_CODE => Self::decode_register(data),
            AUTHENTICATE_COMMAND_CODE => Self::decode_authenticate(control_parameter, data),
            VERSION_COMMAND_CODE => {
                if !data.is_empty() {
                    return Err(DecodeError::TrailingBytes);
                }
                Ok(Request::GetVersion)
            }
            code => Err(DecodeError::UnsupportedCommand(code)),
        }
    }

    /// The challenge parameter [32 bytes] followed by the application
    /// parameter [32 bytes]. Exactly 64 bytes, nothing variable.
    fn decode_register(data: &[u8]) -> Result<Request, DecodeError> {
        if data.len() < CHALLENGE_LEN + APP_ID_LEN {
            return Err(DecodeError::Truncated);
        }
        if data.len() > CHALLENGE_LEN + APP_ID_LEN {
            return Err(DecodeError::TrailingBytes);
        }

        Ok(Request::Register {
            challenge: Challenge::from_bytes(&data[..CHALLENGE_LEN]),
            application: AppId::from_bytes(&data[CHALLENGE_LEN..]),
        })
    }

    /// Challenge [32 bytes], application parameter [32 bytes], key handle
    /// length [1 byte, at most 128], key handle [length as specified].
    ///
    /// The length byte is attacker-controlled. It is checked against both the
    /// handle size limit and the actual buffer length before any bytes are
    /// copied out.
    fn decode_authenticate(control_parameter: u8, data: &[u8]) -> Result<Request, DecodeError> {
        let control_code = match control_parameter {
            AUTH_CHECK_ONLY => AuthenticateControlCode::CheckOnly,
            AUTH_ENFORCE => AuthenticateControlCode::EnforceUserPresenceAndSign,
            code => return Err(DecodeError::UnsupportedControlCode(code)),
        };

        const PREFIX_LEN: usize = CHALLENGE_LEN + APP_ID_LEN + 1;
        if data.len() < PREFIX_LEN {
            return Err(DecodeError::Truncated);
        }

        let key_handle_len = data[CHALLENGE_LEN + APP_ID_LEN] as usize;
        if key_handle_len > MAX_KEY_HANDLE_LEN {
            return Err(DecodeError::LengthOutOfRange);
        }
        if data.len() < PREFIX_LEN + key_handle_len {
            return Err(DecodeError::Truncated);
        }
        if data.len() > PREFIX_LEN + key_handle_len {
            return Err(DecodeError::TrailingBytes);
        }

        Ok(Request::Authenticate {
            challenge: Challenge::from_bytes(&data[..CHALLENGE_LEN]),
            application: AppId::from_bytes(&data[CHALLENGE_LEN..CHALLENGE_LEN + APP_ID_LEN]),
            control_code,
            key_handle: KeyHandle::from(&data[PREFIX_LEN..]),
        })
    }

    /// Encodes the raw request-data body, the inverse of `decode_message`.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        match self {
            Request::Register {
                application,
                challenge,
            } => {
                bytes.extend_from_slice(challenge.as_ref());
                bytes.extend_from_slice(application.as_ref());
            }
            Request::Authenticate {
                application,
                challenge,
                control_code: _,
                key_handle,
            } => {
                bytes.extend_from_slice(challenge.as_ref());
                bytes.extend_from_slice(application.as_ref());
                bytes.push(key_handle.len() as u8);
                bytes.extend_from_slice(key_handle.as_ref());
            }
            Request::GetVersion => {}
        }
        bytes
    }
}

fn read_u8(reader: &mut Cursor<&[u8]>) -> Result<u8, DecodeError> {
    reader.read_u8().map_err(|_| DecodeError::Truncated)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn register_body() -> Vec<u8> {
        let mut body = vec![0x02u8; CHALLENGE_LEN];
        body.extend_from_slice(&[0x01u8; APP_ID_LEN]);
        body
    }

    fn authenticate_body(key_handle_len: u8, actual_len: usize) -> Vec<u8> {
        let mut body = vec![0x02u8; CHALLENGE_LEN];
        body.extend_from_slice(&[0x01u8; APP_ID_LEN]);
        body.push(key_handle_len);
        body.extend_from_slice(&vec![0xabu8; actual_len]);
        body
    }

    fn apdu(command_code: u8, parameter1: u8, data: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8, command_code, parameter1, 0u8, 0u8];
        bytes.push((data.len() >> 8) as u8);
        bytes.push(data.len() as u8);
        bytes.extend_from_slice(data);
        bytes
    }

    #[test]
    fn decode_register_round_trips() {
        let body = register_body();
        let request = Request::decode_message(REGISTER_COMMAND_CODE, 0, &body).unwrap();
        assert_matches!(request, Request::Register { .. });
        assert_eq!(request.encode(), body);
    }

    #[test]
    fn decode_register_rejects_wrong_lengths() {
        assert_matches!(
            Request::decode_message(REGISTER_COMMAND_CODE, 0, &[0u8; 63]),
            Err(DecodeError::Truncated)
        );
        assert_matches!(
            Request::decode_message(REGISTER_COMMAND_CODE, 0, &[0u8; 65]),
            Err(DecodeError::TrailingBytes)
        );
    }

    #[test]
    fn decode_authenticate_round_trips() {
        let body = authenticate_body(16, 16);
        let request = Request::decode_message(AUTHENTICATE_COMMAND_CODE, AUTH_ENFORCE, &body)
            .unwrap();
        assert_matches!(
            request,
            Request::Authenticate {
                control_code: AuthenticateControlCode::EnforceUserPresenceAndSign,
                ..
            }
        );
        assert_eq!(request.encode(), body);
    }

    #[test]
    fn decode_authenticate_rejects_oversized_key_handle_length() {
        let body = authenticate_body(129, 129);
        assert_matches!(
            Request::decode_message(AUTHENTICATE_COMMAND_CODE, AUTH_ENFORCE, &body),
            Err(DecodeError::LengthOutOfRange)
        );
    }

    #[test]
    fn decode_authenticate_rejects_length_past_end_of_buffer() {
        let body = authenticate_body(64, 32);
        assert_matches!(
            Request::decode_message(AUTHENTICATE_COMMAND_CODE, AUTH_ENFORCE, &body),
            Err(DecodeError::Truncated)
        );
    }

    #[test]
    fn decode_authenticate_rejects_unknown_control_byte() {
        let body = authenticate_body(16, 16);
        assert_matches!(
            Request::decode_message(AUTHENTICATE_COMMAND_CODE, 0x08, &body),
            Err(DecodeError::UnsupportedControlCode(0x08))
        );
    }

    #[test]
    fn decode_version_with_empty_body() {
        let request = Request::decode_message(VERSION_COMMAND_CODE, 0, &[]).unwrap();
        assert_matches!(request, Request::GetVersion);
    }

    #[test]
    fn decode_rejects_unsupported_command_codes() {
        assert_matches!(
            Request::decode_message(CHECK_REGISTER_COMMAND_CODE, 0, &[]),
            Err(DecodeError::UnsupportedCommand(0x04))
        );
        assert_matches!(
            Request::decode_message(VENDOR_FIRST_COMMAND_CODE, 0, &[]),
            Err(DecodeError::UnsupportedCommand(0xc0))
        );
    }

    #[test]
    fn decode_apdu_register() {
        let message = apdu(REGISTER_COMMAND_CODE, 0, &register_body());
        assert_matches!(Request::decode(&message), Ok(Request::Register { .. }));
    }

    #[test]
    fn decode_apdu_version_with_omitted_lc() {
        // Lc omitted entirely, and also the two-byte-remainder case where the
        // trailing bytes are Le rather than Lc.
        assert_matches!(
            Request::decode(&[0x00, VERSION_COMMAND_CODE, 0x00, 0x00, 0x00]),
            Ok(Request::GetVersion)
        );
        assert_matches!(
            Request::decode(&[0x00, VERSION_COMMAND_CODE, 0x00, 0x00, 0x00, 0x00, 0x00]),
            Ok(Request::GetVersion)
        );
    }

    #[test]
    fn decode_apdu_rejects_nonzero_class() {
        let message = [0x80, VERSION_COMMAND_CODE, 0x00, 0x00, 0x00];
        assert_matches!(
            Request::decode(&message),
            Err(DecodeError::UnsupportedClass(0x80))
        );
    }

    #[test]
    fn decode_apdu_rejects_short_buffers() {
        assert_matches!(Request::decode(&[]), Err(DecodeError::Truncated));
        assert_matches!(
            Request::decode(&[0x00, REGISTER_COMMAND_CODE]),
            Err(DecodeError::Truncated)
        );
        // Lc promises more data than the buffer holds
        assert_matches!(
            Request::decode(&[0x00, REGISTER_COMMAND_CODE, 0x00, 0x00, 0x00, 0x00, 0x40, 0xaa]),
            Err(DecodeError::Truncated)
        );
    }
}
