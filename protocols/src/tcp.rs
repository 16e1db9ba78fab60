use crate::dns::ProtocolError;

/// Length of the big-endian size prefix in front of every DNS message on a stream.
pub const FRAME_PREFIX_LEN: usize = 2;

/// Prefixes a DNS message with its length for transmission over TCP.
pub fn frame_message(message: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let len = u16::try_from(message.len()).map_err(|_| ProtocolError::FrameTooLong(message.len()))?;
    let mut framed: Vec<u8> = Vec::with_capacity(FRAME_PREFIX_LEN + message.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);
    Ok(framed)
}

/// Reads the message length announced by a frame prefix.
pub fn frame_length(prefix: [u8; FRAME_PREFIX_LEN]) -> usize {
    u16::from_be_bytes(prefix) as usize
}
