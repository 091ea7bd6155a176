//! Checksummed address rendering.
//!
//! Ordinary account identifiers are rendered as base32 of a one-byte version
//! tag, the raw 32-byte ed25519 public key, and a little-endian CRC16-XModem
//! trailer. The encoding is fixed by the network; the version tag puts
//! ordinary accounts in the `G` address space (muxed accounts live under `M`
//! and are produced elsewhere).

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Version tag for an ordinary account identifier (renders as leading `G`).
const VERSION_ACCOUNT: u8 = 6 << 3;

/// Render a raw ed25519 public key as an ordinary account identifier.
#[must_use]
pub fn encode_account_id(key: &[u8; 32]) -> String {
    let mut raw = Vec::with_capacity(35);
    raw.push(VERSION_ACCOUNT);
    raw.extend_from_slice(key);
    let checksum = crc16_xmodem(&raw);
    raw.push((checksum & 0xFF) as u8);
    raw.push((checksum >> 8) as u8);
    base32_encode(&raw)
}

/// CRC16 with the XModem polynomial (0x1021), zero initial value.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= u16::from(*byte) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// RFC 4648 base32, uppercase, without padding.
fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(5) * 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;
    for byte in data {
        buffer = (buffer << 8) | u32::from(*byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            let index = ((buffer >> bits) & 0x1F) as usize;
            out.push(BASE32_ALPHABET[index] as char);
        }
    }
    if bits > 0 {
        let index = ((buffer << (5 - bits)) & 0x1F) as usize;
        out.push(BASE32_ALPHABET[index] as char);
    }
    out
}
