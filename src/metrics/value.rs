//! Atomic f64 storage shared by counter and gauge cells.

use std::sync::atomic::{AtomicU64, Ordering};

/// An f64 held in an `AtomicU64` through its bit pattern, so counter and
/// gauge updates never tear and never block.
#[derive(Debug)]
pub(crate) struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        AtomicF64 {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Adds `delta` via a compare-and-swap loop.
    pub fn add(&self, delta: f64) {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn add_accumulates_across_threads() {
        let value = Arc::new(AtomicF64::new(0.0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let value = value.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        value.add(0.5);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(value.get(), 4000.0);
    }

    #[test]
    fn set_is_last_write_wins() {
        let value = AtomicF64::new(1.5);
        value.set(-2.25);
        assert_eq!(value.get(), -2.25);
    }
}
