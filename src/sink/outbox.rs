use super::MetricPoint;

/// Bounded holding area for points awaiting a write.
///
/// Points accumulate until the outbox reaches its capacity, at which point the full batch
/// is handed back to the caller for writing.
#[derive(Debug)]
pub struct Outbox {
    points: Vec<MetricPoint>,
    capacity: usize,
}

impl Outbox {
    /// A capacity of 0 is treated as 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a point, returning the full batch when this point filled the outbox.
    pub fn push(&mut self, point: MetricPoint) -> Option<Vec<MetricPoint>> {
        self.points.push(point);
        (self.points.len() >= self.capacity).then(|| self.drain())
    }

    /// Take everything currently held.
    pub fn drain(&mut self) -> Vec<MetricPoint> {
        core::mem::take(&mut self.points)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FieldValue, MetricRecord};

    fn point(n: i64) -> MetricPoint {
        MetricPoint::from_record_at(MetricRecord::new("m").with_field("n", FieldValue::Int(n)), n).unwrap()
    }

    #[test]
    fn test_holds_points_until_full() {
        let mut outbox = Outbox::new(3);

        assert!(outbox.push(point(1)).is_none());
        assert!(outbox.push(point(2)).is_none());
        assert_eq!(outbox.len(), 2);

        let batch = outbox.push(point(3)).unwrap();
        assert_eq!(batch.iter().map(MetricPoint::timestamp_nanos).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_drain_takes_partial_batch() {
        let mut outbox = Outbox::new(10);
        let _ = outbox.push(point(1));

        assert_eq!(outbox.drain().len(), 1);
        assert!(outbox.is_empty());
        assert!(outbox.drain().is_empty());
    }

    #[test]
    fn test_zero_capacity_flushes_every_point() {
        let mut outbox = Outbox::new(0);
        assert_eq!(outbox.capacity(), 1);
        assert_eq!(outbox.push(point(1)).map(|b| b.len()), Some(1));
    }
}
