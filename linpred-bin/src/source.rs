// Copyright 2026- linpred developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A module for signal sources for "linpred-bin".

use std::io::Read;
use std::path::Path;

/// A mono signal loaded from a WAV file with `hound`.
///
/// Channels are averaged. Integer samples are scaled so that full scale maps
/// to `[-1.0, 1.0)`.
#[allow(clippy::module_name_repetitions)]
pub struct WavSignal {
    spec: hound::WavSpec,
    samples: Vec<f64>,
}

impl WavSignal {
    /// Constructs `WavSignal` from `path`.
    ///
    /// # Errors
    ///
    /// The function fails when file is not found or has invalid format.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, hound::Error> {
        Self::from_wav_reader(hound::WavReader::open(path)?)
    }

    /// Constructs `WavSignal` from WAV bytes.
    ///
    /// # Errors
    ///
    /// The function fails when the stream has invalid format.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, hound::Error> {
        Self::from_wav_reader(hound::WavReader::new(reader)?)
    }

    fn from_wav_reader<R: Read>(reader: hound::WavReader<R>) -> Result<Self, hound::Error> {
        let spec = reader.spec();
        let interleaved: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let scale = 1.0 / f64::from(1u32 << (spec.bits_per_sample - 1));
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| f64::from(v) * scale))
                    .collect::<Result<_, _>>()?
            }
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<Result<_, _>>()?,
        };

        let channels = usize::from(spec.channels.max(1));
        let samples = interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect();
        Ok(Self { spec, samples })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub const fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    pub const fn channels(&self) -> u16 {
        self.spec.channels
    }

    pub fn duration_as_secs(&self) -> f32 {
        self.samples.len() as f32 / self.spec.sample_rate as f32
    }
}
