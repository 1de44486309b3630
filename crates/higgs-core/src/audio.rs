//! In-memory WAV and base64 helpers.

use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::Cursor;

/// Encode mono f32 samples as a 32-bit float WAV file in memory.
///
/// Samples should be f32 in range [-1, 1].
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    if sample_rate == 0 {
        return Err(Error::Audio("sample rate must be non-zero".into()));
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut buffer = Cursor::new(Vec::with_capacity(44 + samples.len() * 4));
    let mut writer = hound::WavWriter::new(&mut buffer, spec)
        .map_err(|e| Error::Audio(format!("Failed to start WAV: {}", e)))?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| Error::Audio(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| Error::Audio(format!("Failed to finalize WAV: {}", e)))?;

    Ok(buffer.into_inner())
}

/// Decode a WAV file held in memory into mono f32 samples.
///
/// Converts 16/24/32-bit integer and 32-bit float input; channels are averaged.
pub fn decode_wav(bytes: &[u8]) -> Result<(Vec<f32>, u32)> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| Error::Audio(format!("Failed to parse WAV: {}", e)))?;

    let spec = reader.spec();

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Int, 24) => reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8388608.0))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Int, 32) => reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2147483648.0))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        _ => {
            return Err(Error::Audio(format!(
                "Unsupported format: {:?} {}bit",
                spec.sample_format, spec.bits_per_sample
            )))
        }
    };

    let channels = spec.channels.max(1) as usize;
    let samples = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((samples, spec.sample_rate))
}

/// Duration in seconds of `len` samples at `sample_rate`.
pub fn duration_secs(len: usize, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    len as f64 / sample_rate as f64
}

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn from_base64(data: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(data.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(len: usize) -> Vec<f32> {
        (0..len).map(|i| ((i as f32) * 0.05).sin() * 0.5).collect()
    }

    #[test]
    fn test_encoded_wav_has_riff_header() {
        let wav = encode_wav(&tone(100), 24000).unwrap();
        assert_eq!(&wav[..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        // header + 4 bytes per f32 sample
        assert!(wav.len() >= 44 + 400);
    }

    #[test]
    fn test_base64_wav_preserves_duration() {
        let samples = tone(36000);
        let encoded = to_base64(&encode_wav(&samples, 24000).unwrap());

        let (decoded, sr) = decode_wav(&from_base64(&encoded).unwrap()).unwrap();
        assert_eq!(sr, 24000);
        assert_eq!(decoded.len(), samples.len());
        assert!((duration_secs(decoded.len(), sr) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_decode_int16_stereo_to_mono() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut buffer, spec).unwrap();
            for _ in 0..10 {
                writer.write_sample(16384i16).unwrap();
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }

        let (samples, sr) = decode_wav(buffer.get_ref()).unwrap();
        assert_eq!(sr, 16000);
        assert_eq!(samples.len(), 10);
        assert!((samples[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_decode_multichannel_keeps_duration() {
        let spec = hound::WavSpec {
            channels: 3,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut buffer, spec).unwrap();
            for _ in 0..4000 {
                writer.write_sample(0.3f32).unwrap();
                writer.write_sample(0.6f32).unwrap();
                writer.write_sample(0.0f32).unwrap();
            }
            writer.finalize().unwrap();
        }

        let (samples, sr) = decode_wav(buffer.get_ref()).unwrap();
        assert_eq!(samples.len(), 4000);
        assert!((duration_secs(samples.len(), sr) - 0.5).abs() < 1e-9);
        assert!((samples[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_wav(b"not a wav"), Err(Error::Audio(_))));
    }

    #[test]
    fn test_zero_sample_rate() {
        assert_eq!(duration_secs(100, 0), 0.0);
        assert!(encode_wav(&[0.0], 0).is_err());
    }
}
