//! Clipboard writes through the terminal (OSC 52).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::{self, Write};

/// Common OSC 52 size limit (base64 payload bytes).
const MAX_OSC52_PAYLOAD: usize = 74_994;

/// Build the OSC 52 "set clipboard" sequence for `text`.
pub(super) fn osc52_sequence(text: &str) -> io::Result<String> {
    let encoded = STANDARD.encode(text.as_bytes());
    if encoded.len() > MAX_OSC52_PAYLOAD {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "text too large for terminal clipboard",
        ));
    }
    Ok(format!("\x1b]52;c;{}\x07", encoded))
}

/// Ask the terminal to place `text` on the system clipboard.
pub(super) fn copy(text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "nothing to copy"));
    }
    let seq = osc52_sequence(text)?;
    let mut stdout = io::stdout();
    stdout.write_all(seq.as_bytes())?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_encodes_sku() {
        assert_eq!(osc52_sequence("7076192").unwrap(), "\x1b]52;c;NzA3NjE5Mg==\x07");
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let big = "x".repeat(MAX_OSC52_PAYLOAD);
        assert!(osc52_sequence(&big).is_err());
    }
}
