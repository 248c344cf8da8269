use std::fmt;

use crate::augmentation::domain::augmentation_operation::AugmentationOperation;
use crate::augmentation::domain::operation_error::OperationError;
use crate::shared::signal::Signal;

type ApplyFn = dyn Fn(&mut Signal) -> Result<(), OperationError> + Send + Sync;

/// Wraps a named closure as an [`AugmentationOperation`].
///
/// Lets callers plug an external DSP routine into a chain without declaring
/// a dedicated type for it.
pub struct FnOperation {
    name: String,
    apply: Box<ApplyFn>,
}

impl FnOperation {
    pub fn new<F>(name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&mut Signal) -> Result<(), OperationError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply: Box::new(apply),
        }
    }
}

impl fmt::Debug for FnOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl AugmentationOperation for FnOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, signal: &mut Signal) -> Result<(), OperationError> {
        (self.apply)(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_name_is_reported() {
        let op = FnOperation::new("invert", |_| Ok(()));
        assert_eq!(op.name(), "invert");
    }

    #[test]
    fn test_closure_is_applied() {
        let op = FnOperation::new("invert", |signal: &mut Signal| {
            for s in signal.samples_mut() {
                *s = -*s;
            }
            Ok(())
        });
        let mut signal = Signal::mono(vec![0.5, -0.25], 16000);
        op.apply(&mut signal).unwrap();
        assert_relative_eq!(signal.samples()[0], -0.5);
        assert_relative_eq!(signal.samples()[1], 0.25);
    }

    #[test]
    fn test_closure_error_is_returned() {
        let op = FnOperation::new("strict", |signal: &mut Signal| {
            Err(OperationError::UnsupportedSampleRate(signal.sample_rate()))
        });
        let mut signal = Signal::mono(vec![0.0], 7);
        assert_eq!(
            op.apply(&mut signal),
            Err(OperationError::UnsupportedSampleRate(7))
        );
    }

    #[test]
    fn test_debug_shows_name() {
        let op = FnOperation::new("gain", |_| Ok(()));
        assert!(format!("{op:?}").contains("gain"));
    }
}
