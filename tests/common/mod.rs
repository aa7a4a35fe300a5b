//! In-memory byte fixtures for the integration suite.
//!
//! Everything is crafted by hand so tests stay hermetic: no sample files,
//! no filesystem beyond the analyze_path tests.

/// A minimal well-formed PDF: header, one object, xref table, trailer, EOF.
pub fn minimal_pdf() -> Vec<u8> {
    b"%PDF-1.4\n\
      1 0 obj\n<< /Type /Catalog >>\nendobj\n\
      xref\n0 2\n0000000000 65535 f \n0000000009 00000 n \n\
      trailer\n<< /Size 2 /Root 1 0 R >>\n\
      startxref\n9\n\
      %%EOF\n"
        .to_vec()
}

/// The same PDF with its trailing `%%EOF` marker removed.
pub fn pdf_without_eof() -> Vec<u8> {
    let pdf = minimal_pdf();
    let cut = pdf.windows(5).rposition(|w| w == b"%%EOF").unwrap();
    pdf[..cut].to_vec()
}

/// A PDF whose trailer references an encryption dictionary.
pub fn encrypted_pdf() -> Vec<u8> {
    b"%PDF-1.4\n\
      1 0 obj\n<< /Type /Catalog >>\nendobj\n\
      trailer\n<< /Size 2 /Root 1 0 R /Encrypt 2 0 R >>\n\
      %%EOF\n"
        .to_vec()
}

/// A well-formed PDF whose body carries the DOS-stub marker string, as a
/// smuggled executable would.
pub fn pdf_with_dos_stub() -> Vec<u8> {
    let mut pdf = b"%PDF-1.4\n% This program cannot be run in DOS mode\n".to_vec();
    pdf.extend_from_slice(&minimal_pdf()[9..]);
    pdf
}

/// Minimal JPEG: SOI, an APP0 stub, EOI.
pub fn minimal_jpeg() -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    jpeg.extend_from_slice(b"JFIF\x00");
    jpeg.extend_from_slice(&[0u8; 9]);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Minimal PNG: signature, IHDR, IEND.
pub fn minimal_png() -> Vec<u8> {
    let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
    png.extend_from_slice(&13u32.to_be_bytes());
    png.extend_from_slice(b"IHDR");
    png.extend_from_slice(&[0u8; 13]);
    png.extend_from_slice(&[0u8; 4]); // crc not validated by triage
    png.extend_from_slice(&0u32.to_be_bytes());
    png.extend_from_slice(b"IEND");
    png.extend_from_slice(&[0xAE, 0x42, 0x60, 0x82]);
    png
}

/// One stored ZIP entry followed by an end-of-central-directory record.
///
/// `compressed_size_override` lets a test declare more payload than is
/// present; `flags` feeds the encryption bit.
pub fn zip_with_entry(
    name: &[u8],
    payload: &[u8],
    flags: u16,
    compressed_size_override: Option<u32>,
) -> Vec<u8> {
    let mut out = zip_local_entry(name, payload, flags, compressed_size_override);
    out.extend_from_slice(&zip_eocd());
    out
}

/// A lone local entry without any central directory.
pub fn zip_local_entry(
    name: &[u8],
    payload: &[u8],
    flags: u16,
    compressed_size_override: Option<u32>,
) -> Vec<u8> {
    let mut out = b"PK\x03\x04".to_vec();
    out.extend_from_slice(&20u16.to_le_bytes()); // version needed
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // method: stored
    out.extend_from_slice(&[0u8; 4]); // mod time/date
    out.extend_from_slice(&[0u8; 4]); // crc32
    let compressed = compressed_size_override.unwrap_or(payload.len() as u32);
    out.extend_from_slice(&compressed.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&(name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // extra len
    out.extend_from_slice(name);
    out.extend_from_slice(payload);
    out
}

pub fn zip_eocd() -> Vec<u8> {
    let mut out = b"PK\x05\x06".to_vec();
    out.extend_from_slice(&[0u8; 18]);
    out
}

/// A compound-file (legacy Office) header followed by zero padding.
pub fn cfb_stub() -> Vec<u8> {
    let mut cfb = b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1".to_vec();
    cfb.extend_from_slice(&[0u8; 504]);
    cfb
}

/// A plausible RFC-822 message head.
pub fn eml_stub() -> Vec<u8> {
    b"Received: from mail.example.com\r\n\
      From: custodian@example.com\r\n\
      To: counsel@example.com\r\n\
      Subject: Q3 figures\r\n\r\nBody.\r\n"
        .to_vec()
}
