/// A decoded audio signal: interleaved PCM samples plus the rate they were
/// sampled at. Chains treat it as an opaque value and only ever clone it.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl Signal {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self::new(samples, sample_rate, 1)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Swaps in a new sample buffer, e.g. after a time stretch changed the length.
    pub fn replace_samples(&mut self, samples: Vec<f32>) {
        self.samples = samples;
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_creates_signal_with_correct_fields() {
        let samples = vec![0.25f32; 16000];
        let signal = Signal::new(samples.clone(), 16000, 1);
        assert_eq!(signal.samples(), &samples[..]);
        assert_eq!(signal.sample_rate(), 16000);
        assert_eq!(signal.channels(), 1);
        assert_eq!(signal.len(), 16000);
    }

    #[test]
    fn test_mono_has_one_channel() {
        let signal = Signal::mono(vec![0.0; 10], 22050);
        assert_eq!(signal.channels(), 1);
        assert_eq!(signal.sample_rate(), 22050);
    }

    #[test]
    fn test_duration_mono() {
        let signal = Signal::mono(vec![0.0; 48000], 16000);
        assert_relative_eq!(signal.duration(), 3.0);
    }

    #[test]
    fn test_duration_stereo() {
        let signal = Signal::new(vec![0.0; 96000], 48000, 2);
        assert_relative_eq!(signal.duration(), 1.0);
    }

    #[test]
    fn test_duration_zero_rate_is_zero() {
        let signal = Signal::mono(vec![0.0; 100], 0);
        assert_relative_eq!(signal.duration(), 0.0);
    }

    #[test]
    fn test_replace_samples_changes_length() {
        let mut signal = Signal::mono(vec![0.0; 100], 16000);
        signal.replace_samples(vec![1.0; 80]);
        assert_eq!(signal.len(), 80);
        assert_eq!(signal.sample_rate(), 16000);
    }

    #[test]
    fn test_samples_mut() {
        let mut signal = Signal::mono(vec![0.0; 100], 16000);
        signal.samples_mut()[50] = 1.0;
        assert_eq!(signal.samples()[50], 1.0);
    }

    #[test]
    fn test_clone_is_sample_identical() {
        let signal = Signal::mono(vec![0.1, -0.2, 0.3], 8000);
        assert_eq!(signal.clone(), signal);
    }

    #[test]
    fn test_empty_signal() {
        let signal = Signal::mono(Vec::new(), 8000);
        assert!(signal.is_empty());
        assert_eq!(signal.into_samples(), Vec::<f32>::new());
    }
}
