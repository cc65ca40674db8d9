use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SampleDataError {
    #[error("list of samples cannot be empty")]
    Empty,
    #[error("sampling rate must be greater than 0, got {0}")]
    NonPositiveRate(f32),
    #[error("sample at index {index} is not a finite number")]
    NonFiniteSample { index: usize },
}

/// Immutable snapshot of PCM data. Replaced wholesale on update, never
/// mutated in place; consumers keep a reference only for the render
/// passes that use it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    rate: f32,
    duration: f32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, rate: f32) -> Result<Self, SampleDataError> {
        if samples.is_empty() {
            return Err(SampleDataError::Empty);
        }
        if !(rate > 0.0) {
            return Err(SampleDataError::NonPositiveRate(rate));
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(SampleDataError::NonFiniteSample { index });
        }

        let duration = samples.len() as f32 / rate;
        Ok(Self {
            samples,
            rate,
            duration,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Smallest and largest sample value. Recomputed fresh so axes never
    /// end up scaled to stale data.
    pub fn min_max(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &s in &self.samples {
            min = min.min(s);
            max = max.max(s);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_len_over_rate() {
        let buffer = SampleBuffer::new(vec![0.0, 10.0, 0.0, -10.0], 2.0).unwrap();
        assert_eq!(buffer.duration(), 2.0);
        assert_eq!(buffer.min_max(), (-10.0, 10.0));
    }

    #[test]
    fn rejects_empty_samples() {
        assert_eq!(SampleBuffer::new(vec![], 44100.0), Err(SampleDataError::Empty));
    }

    #[test]
    fn rejects_non_positive_rate() {
        assert_eq!(
            SampleBuffer::new(vec![0.0], 0.0),
            Err(SampleDataError::NonPositiveRate(0.0))
        );
        assert_eq!(
            SampleBuffer::new(vec![0.0], -1.0),
            Err(SampleDataError::NonPositiveRate(-1.0))
        );
    }

    #[test]
    fn rejects_non_finite_samples() {
        assert_eq!(
            SampleBuffer::new(vec![0.0, f32::NAN], 1.0),
            Err(SampleDataError::NonFiniteSample { index: 1 })
        );
    }
}
