pub(crate) const REGISTER_COMMAND_CODE: u8 = 0x01;
pub(crate) const AUTHENTICATE_COMMAND_CODE: u8 = 0x02;
pub(crate) const VERSION_COMMAND_CODE: u8 = 0x03;
#[allow(dead_code)]
pub(crate) const CHECK_REGISTER_COMMAND_CODE: u8 = 0x04; // Reserved, not implemented
#[allow(dead_code)]
pub(crate) const AUTHENTICATE_BATCH_COMMAND_CODE: u8 = 0x05; // Reserved, not implemented
#[allow(dead_code)]
pub(crate) const VENDOR_FIRST_COMMAND_CODE: u8 = 0xc0;
#[allow(dead_code)]
pub(crate) const VENDOR_LAST_COMMAND_CODE: u8 = 0xff;

pub(crate) const SW_NO_ERROR: u16 = 0x9000; // The command completed successfully without error.
pub(crate) const SW_WRONG_LENGTH: u16 = 0x6700; // The length of the request was invalid.
pub(crate) const SW_WRONG_DATA: u16 = 0x6A80; // The request was rejected due to an invalid key handle.
pub(crate) const SW_CONDITIONS_NOT_SATISFIED: u16 = 0x6985; // The request was rejected due to test-of-user-presence being required.
#[allow(dead_code)]
pub(crate) const SW_COMMAND_NOT_ALLOWED: u16 = 0x6986;
pub(crate) const SW_INS_NOT_SUPPORTED: u16 = 0x6D00; // The Instruction of the request is not supported.
pub(crate) const SW_CLA_NOT_SUPPORTED: u16 = 0x6E00; // The Class byte of the request is not supported.
pub(crate) const SW_VENDOR_NOMEM: u16 = 0xEE04; // Vendor-defined: no key storage slot available.
pub(crate) const SW_UNKNOWN: u16 = 0x6F00; // Response status : No precise diagnosis

pub(crate) const AUTH_ENFORCE: u8 = 0x03; // Enforce user presence and sign
pub(crate) const AUTH_CHECK_ONLY: u8 = 0x07; // Check only
pub(crate) const AUTH_FLAG_TUP: u8 = 0x01; // Test of user presence set

pub(crate) const APP_ID_LEN: usize = 32;
pub(crate) const CHALLENGE_LEN: usize = 32;
pub(crate) const EC_POINT_LEN: usize = 65;

/// Spec says 255 is max length, but the reference header says 128.
/// Chose the smaller, it is still sufficient entropy to avoid collisions.
pub(crate) const MAX_KEY_HANDLE_LEN: usize = 128;
pub(crate) const MAX_ATT_CERT_LEN: usize = 2048;
pub(crate) const MAX_SIGNATURE_LEN: usize = 72;

pub(crate) const REGISTER_ID: u8 = 0x05; // Version 2 registration identifier
pub(crate) const REGISTER_HASH_ID: u8 = 0x00; // Version 2 hash identifier

pub(crate) const EC_POINT_FORMAT_UNCOMPRESSED: u8 = 0x04;

pub(crate) const VERSION_STRING: &str = "U2F_V2";
