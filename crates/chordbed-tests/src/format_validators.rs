//! WAV format validator for test infrastructure.
//!
//! Parses the RIFF header independently of the encoder so tests check the
//! bytes on disk, not the writer's own idea of them.

use std::fmt;

/// Error type for format validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// Description of what went wrong.
    pub message: String,
    /// Byte offset where the error occurred, if applicable.
    pub offset: Option<usize>,
}

impl FormatError {
    /// Create a new format error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
        }
    }

    /// Create a format error with a byte offset.
    pub fn at_offset(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset: Some(offset),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "WAV error at offset {}: {}", offset, self.message),
            None => write!(f, "WAV error: {}", self.message),
        }
    }
}

impl std::error::Error for FormatError {}

/// Information extracted from a WAV file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Number of frames (samples per channel).
    pub num_frames: usize,
    /// Audio format code (1 = PCM).
    pub audio_format: u16,
    /// Byte rate.
    pub byte_rate: u32,
    /// Block alignment.
    pub block_align: u16,
    /// Offset of the first PCM byte.
    pub data_offset: usize,
    /// Size of the data chunk in bytes.
    pub data_size: usize,
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Validate WAV file format and extract header information.
///
/// Checks the RIFF and WAVE identifiers, requires a `fmt ` chunk before the
/// `data` chunk, and requires the data chunk to fit in the buffer.
pub fn validate_wav(data: &[u8]) -> Result<WavInfo, FormatError> {
    const MIN_HEADER_SIZE: usize = 44;

    if data.len() < MIN_HEADER_SIZE {
        return Err(FormatError::new(format!(
            "File too short: {} bytes (minimum {} required)",
            data.len(),
            MIN_HEADER_SIZE
        )));
    }
    if &data[0..4] != b"RIFF" {
        return Err(FormatError::at_offset("Invalid RIFF header", 0));
    }
    if read_u32(data, 4) as usize != data.len() - 8 {
        return Err(FormatError::at_offset(
            format!("RIFF size {} does not match file length", read_u32(data, 4)),
            4,
        ));
    }
    if &data[8..12] != b"WAVE" {
        return Err(FormatError::at_offset("Invalid WAVE format", 8));
    }

    let mut offset = 12;
    let mut fmt: Option<(u16, u16, u32, u32, u16, u16)> = None;

    while offset + 8 <= data.len() {
        let chunk_id = &data[offset..offset + 4];
        let chunk_size = read_u32(data, offset + 4) as usize;
        let body = offset + 8;

        if chunk_id == b"fmt " {
            if chunk_size < 16 || body + 16 > data.len() {
                return Err(FormatError::at_offset("Truncated fmt chunk", offset));
            }
            fmt = Some((
                read_u16(data, body),
                read_u16(data, body + 2),
                read_u32(data, body + 4),
                read_u32(data, body + 8),
                read_u16(data, body + 12),
                read_u16(data, body + 14),
            ));
        }

        if chunk_id == b"data" {
            let (audio_format, channels, sample_rate, byte_rate, block_align, bits_per_sample) =
                fmt.ok_or_else(|| {
                    FormatError::at_offset("data chunk found before fmt chunk", offset)
                })?;
            if body + chunk_size > data.len() {
                return Err(FormatError::at_offset("Truncated data chunk", offset));
            }
            let num_frames = if block_align > 0 {
                chunk_size / block_align as usize
            } else {
                0
            };

            return Ok(WavInfo {
                channels,
                sample_rate,
                bits_per_sample,
                num_frames,
                audio_format,
                byte_rate,
                block_align,
                data_offset: body,
                data_size: chunk_size,
            });
        }

        // Chunks are word-aligned
        offset = body + ((chunk_size + 1) & !1);
    }

    Err(FormatError::new("No data chunk found"))
}

/// Decodes the data chunk of a 16-bit WAV file into interleaved samples.
pub fn read_pcm16(data: &[u8]) -> Result<Vec<i16>, FormatError> {
    let info = validate_wav(data)?;
    if info.bits_per_sample != 16 {
        return Err(FormatError::new(format!(
            "Expected 16-bit PCM, got {} bits",
            info.bits_per_sample
        )));
    }
    Ok(data[info.data_offset..info.data_offset + info.data_size]
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect())
}
