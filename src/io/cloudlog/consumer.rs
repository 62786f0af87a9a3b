//! Replay sink interface.

use std::time::Instant;

use crate::core::types::Point3D;

/// Downstream consumer of replayed frames, such as an object tracker.
///
/// Called once per frame, in file order.
pub trait CloudConsumer {
    /// Deliver one frame captured at `stamp`.
    fn update(&mut self, stamp: Instant, cloud: &[Point3D]);
}

impl<F> CloudConsumer for F
where
    F: FnMut(Instant, &[Point3D]),
{
    #[inline]
    fn update(&mut self, stamp: Instant, cloud: &[Point3D]) {
        self(stamp, cloud)
    }
}

/// Consumer that keeps every update it receives.
#[derive(Debug, Default, Clone)]
pub struct CollectingConsumer {
    /// Received (stamp, cloud) pairs in delivery order
    pub updates: Vec<(Instant, Vec<Point3D>)>,
}

impl CollectingConsumer {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of updates received.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// True if nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl CloudConsumer for CollectingConsumer {
    fn update(&mut self, stamp: Instant, cloud: &[Point3D]) {
        self.updates.push((stamp, cloud.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_consumer() {
        let mut seen = 0usize;
        {
            let mut consumer = |_: Instant, cloud: &[Point3D]| seen += cloud.len();
            consumer.update(Instant::now(), &[Point3D::default(); 3]);
            consumer.update(Instant::now(), &[]);
        }
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_collecting_consumer() {
        let mut consumer = CollectingConsumer::new();
        let now = Instant::now();
        consumer.update(now, &[Point3D::new(1.0, 2.0, 3.0)]);

        assert_eq!(consumer.len(), 1);
        assert_eq!(consumer.updates[0].0, now);
        assert_eq!(consumer.updates[0].1, vec![Point3D::new(1.0, 2.0, 3.0)]);
    }
}
