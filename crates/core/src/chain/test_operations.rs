//! Stub operations shared by the chain tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::augmentation::domain::operation_error::OperationError;
use crate::augmentation::infrastructure::fn_operation::FnOperation;
use crate::shared::signal::Signal;

pub const TEST_SAMPLE_RATE: u32 = 16000;

pub fn mono(samples: &[f32]) -> Signal {
    Signal::mono(samples.to_vec(), TEST_SAMPLE_RATE)
}

/// Deterministic pseudo-random audio in [-1, 1].
pub fn noise_signal(len: usize, seed: u64) -> Signal {
    let mut state = seed;
    let samples = (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let bits = (state >> 33) as f64 / (1u64 << 31) as f64;
            (bits * 2.0 - 1.0) as f32
        })
        .collect();
    Signal::mono(samples, TEST_SAMPLE_RATE)
}

pub fn shared(ops: Vec<FnOperation>) -> Vec<SharedOperation> {
    ops.into_iter()
        .map(|op| Arc::new(op) as SharedOperation)
        .collect()
}

pub fn add(amount: f32) -> FnOperation {
    FnOperation::new("add", move |signal: &mut Signal| {
        for s in signal.samples_mut() {
            *s += amount;
        }
        Ok(())
    })
}

pub fn scale(factor: f32) -> FnOperation {
    FnOperation::new("scale", move |signal: &mut Signal| {
        for s in signal.samples_mut() {
            *s *= factor;
        }
        Ok(())
    })
}

/// Appends `tag` as an extra sample, so the tail of a variant records which
/// operations touched it and in what order.
pub fn tag(tag: f32) -> FnOperation {
    FnOperation::new(format!("tag_{tag}"), move |signal: &mut Signal| {
        let mut samples = signal.samples().to_vec();
        samples.push(tag);
        signal.replace_samples(samples);
        Ok(())
    })
}

pub fn failing(name: &str) -> FnOperation {
    let message = format!("{name} rejected input");
    FnOperation::new(name, move |_: &mut Signal| Err(OperationError::failed(message.clone())))
}

/// Counts its calls, optionally sleeping to widen race windows.
pub fn counting(calls: Arc<AtomicUsize>, delay: Duration) -> FnOperation {
    FnOperation::new("counting", move |_: &mut Signal| {
        calls.fetch_add(1, Ordering::SeqCst);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        Ok(())
    })
}

/// A mix of order-sensitive operations: the result of composing them
/// depends on both subset membership and application order.
pub fn order_sensitive_ops(n: usize) -> Vec<SharedOperation> {
    shared(
        (0..n)
            .map(|i| match i % 3 {
                0 => add(0.25 * (i + 1) as f32),
                1 => scale(1.0 + 0.5 * i as f32),
                _ => tag(i as f32),
            })
            .collect(),
    )
}
