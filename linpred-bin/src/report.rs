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

//! Serializable analysis results written by "linpred-bin".

use ndarray::Axis;
use serde::Deserialize;
use serde::Serialize;

use linpred::config;
use linpred::BatchPrediction;

/// LPC model of a single frame.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FrameReport {
    /// Index of the first sample of the frame.
    pub offset: usize,
    pub error: f64,
    pub degenerate: bool,
    pub coefs: Vec<f64>,
    pub reflection: Vec<f64>,
}

/// Per-frame LPC models of a file.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Report {
    pub source: String,
    pub sample_rate: u32,
    pub order: usize,
    pub frame_size: usize,
    pub hop_size: usize,
    pub frames: Vec<FrameReport>,
}

impl Report {
    /// Collects rows of `prediction` obtained with `analyze_frames`.
    pub fn new(
        source: &str,
        sample_rate: u32,
        config: &config::Analysis,
        prediction: &BatchPrediction,
    ) -> Self {
        let frames = prediction
            .coefs
            .lanes(Axis(1))
            .into_iter()
            .zip(prediction.reflection.lanes(Axis(1)))
            .zip(prediction.error.iter().zip(prediction.degenerate.iter()))
            .enumerate()
            .map(|(i, ((coefs, reflection), (&error, &degenerate)))| FrameReport {
                offset: i * config.hop_size,
                error,
                degenerate,
                coefs: coefs.to_vec(),
                reflection: reflection.to_vec(),
            })
            .collect();
        Self {
            source: source.to_owned(),
            sample_rate,
            order: config.order,
            frame_size: config.frame_size,
            hop_size: config.hop_size,
            frames,
        }
    }

    pub fn degenerate_count(&self) -> usize {
        self.frames.iter().filter(|f| f.degenerate).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use linpred::sigen::Signal;
    use linpred::sigen::Sine;

    fn analysis(order: usize) -> config::Analysis {
        config::Analysis {
            order,
            frame_size: 64,
            hop_size: 32,
            demean: false,
            ..config::Analysis::default()
        }
    }

    #[test]
    fn one_entry_per_frame() {
        let config = analysis(4);
        let signal = Sine::new(10, 0.5).noise_with_seed(1, 0.1).to_vec(320);
        let p = linpred::analyze_frames(&signal, &config).unwrap();
        let report = Report::new("sine.wav", 16000, &config, &p);

        assert_eq!(report.frames.len(), 9);
        assert_eq!(report.frames[2].offset, 64);
        assert!(report.frames.iter().all(|f| f.coefs.len() == 5));
        assert!(report.frames.iter().all(|f| f.reflection.len() == 4));
        assert_eq!(report.degenerate_count(), 0);

        let q = linpred::lpc_1d(&signal[64..128], 4, config.lpc.backend).unwrap();
        assert_eq!(report.frames[2].error, q.error());
    }

    #[test]
    fn toml_round_trip() {
        let config = analysis(2);
        let signal = Sine::new(16, 1.0).noise_with_seed(2, 0.2).to_vec(128);
        let p = linpred::analyze_frames(&signal, &config).unwrap();
        let report = Report::new("a.wav", 8000, &config, &p);

        let serialized = toml::to_string(&report).unwrap();
        let restored: Report = toml::from_str(&serialized).unwrap();
        assert_eq!(restored, report);
    }

    #[test]
    fn silent_frames_are_counted() {
        let config = analysis(2);
        let p = linpred::analyze_frames(&[0.0; 96], &config).unwrap();
        let report = Report::new("silence.wav", 8000, &config, &p);
        assert_eq!(report.frames.len(), 2);
        assert_eq!(report.degenerate_count(), 2);
    }
}
