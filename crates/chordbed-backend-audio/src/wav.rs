//! Deterministic WAV encoder.
//!
//! Writes canonical 44-byte-header, 16-bit PCM stereo WAV files with no
//! timestamps or optional chunks, so identical samples always produce
//! identical bytes. The BLAKE3 hash of the PCM payload identifies a render.

use std::io::{self, Write};

use crate::mixer::StereoOutput;

/// Size of the canonical RIFF/WAVE header in bytes.
pub const HEADER_SIZE: usize = 44;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 here).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// 16-bit stereo at the given rate.
    pub fn stereo(sample_rate: u32) -> Self {
        Self {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Writes a complete WAV file to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let riff_size = 36 + data_size;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Converts one sample to 16-bit PCM: `round(clamp(s, -1, 1) * 32767)`.
#[inline]
pub fn to_pcm16(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

/// Interleaves a stereo buffer into little-endian 16-bit PCM bytes.
pub fn stereo_to_pcm16(stereo: &StereoOutput) -> Vec<u8> {
    stereo
        .interleave()
        .into_iter()
        .flat_map(|s| to_pcm16(s).to_le_bytes())
        .collect()
}

/// BLAKE3 hex digest of PCM bytes.
pub fn pcm_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// An encoded WAV file.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of stereo frames.
    pub num_frames: usize,
}

impl WavResult {
    /// Encodes a stereo buffer.
    pub fn from_stereo(stereo: &StereoOutput, sample_rate: u32) -> Self {
        let pcm = stereo_to_pcm16(stereo);
        let pcm_hash = pcm_hash(&pcm);

        let mut wav_data = Vec::with_capacity(HEADER_SIZE + pcm.len());
        write_wav(&mut wav_data, &WavFormat::stereo(sample_rate), &pcm)
            .expect("writing to Vec should not fail");

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_frames: stereo.len(),
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames as f64 / self.sample_rate as f64
    }
}

/// Finds the `data` chunk payload in a WAV file.
///
/// Returns `None` if the buffer is not RIFF/WAVE or has no complete data chunk.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;

        let body_start = pos + 8;
        if chunk_id == b"data" {
            return wav_data.get(body_start..body_start + chunk_size);
        }

        // Chunks are word aligned.
        pos = body_start + chunk_size + (chunk_size & 1);
    }

    None
}

/// PCM hash of an encoded WAV file, or `None` if it cannot be parsed.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(pcm_hash)
}
