use super::{MetricPoint, Outbox, TimeSeriesWriter};
use crate::Result;

const LOG_TARGET: &str = "      sink";

pub const DEFAULT_OUTBOX_CAPACITY: usize = 500;

/// Owns a [`TimeSeriesWriter`] and buffers points in a bounded outbox in front of it.
///
/// Points handed to the adapter are only guaranteed to reach the writer once
/// [`close`](Self::close) returns. Use [`scoped`](Self::scoped) to make sure that
/// happens on every exit path.
#[derive(Debug)]
pub struct SinkAdapter<W> {
    writer: W,
    outbox: Outbox,
    written: usize,
}

impl<W: TimeSeriesWriter> SinkAdapter<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, DEFAULT_OUTBOX_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        Self {
            writer,
            outbox: Outbox::new(capacity),
            written: 0,
        }
    }

    /// Run `body` against a fresh adapter, then close it whatever the outcome.
    ///
    /// When both `body` and the close fail, the error from `body` is returned and the close
    /// error is logged.
    pub async fn scoped<T>(writer: W, capacity: usize, body: impl AsyncFnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let mut adapter = Self::with_capacity(writer, capacity);
        let outcome = body(&mut adapter).await;
        let closed = adapter.close().await;

        match (outcome, closed) {
            (Ok(value), Ok(written)) => {
                log::debug!(target: LOG_TARGET, "Sink closed after writing {written} point(s)");
                Ok(value)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(written)) => {
                log::debug!(target: LOG_TARGET, "Sink closed after writing {written} point(s) of a failed cycle");
                Err(e)
            }
            (Err(e), Err(close_err)) => {
                log::error!(target: LOG_TARGET, "Could not close sink: {close_err:#}");
                Err(e)
            }
        }
    }

    pub async fn write_one(&mut self, point: MetricPoint) -> Result<()> {
        match self.outbox.push(point) {
            Some(batch) => self.send(batch).await,
            None => Ok(()),
        }
    }

    pub async fn write_many(&mut self, points: impl IntoIterator<Item = MetricPoint> + Send) -> Result<()> {
        for point in points {
            self.write_one(point).await?;
        }

        Ok(())
    }

    /// Hand everything currently buffered to the writer.
    pub async fn flush(&mut self) -> Result<()> {
        let batch = self.outbox.drain();
        self.send(batch).await
    }

    /// Drain the outbox and close the writer, returning the number of points written.
    ///
    /// The writer is closed even if the final drain fails; the first failure is reported.
    pub async fn close(mut self) -> Result<usize> {
        let flushed = self.flush().await;
        let closed = self.writer.close().await;

        flushed?;
        closed?;
        Ok(self.written)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.outbox.len()
    }

    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    async fn send(&mut self, batch: Vec<MetricPoint>) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        self.writer.write_many(&batch).await?;
        self.written += batch.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FieldValue, MetricRecord};
    use ohno::app_err;

    /// Records every batch it receives; can be told to fail writes or the close.
    #[derive(Debug, Default)]
    struct RecordingWriter {
        batches: Vec<Vec<i64>>,
        closed: bool,
        fail_writes: bool,
        fail_close: bool,
    }

    impl TimeSeriesWriter for &mut RecordingWriter {
        async fn write_many(&mut self, points: &[MetricPoint]) -> Result<()> {
            if self.fail_writes {
                return Err(app_err!("write refused"));
            }
            self.batches.push(points.iter().map(MetricPoint::timestamp_nanos).collect());
            Ok(())
        }

        async fn close(&mut self) -> Result<()> {
            self.closed = true;
            if self.fail_close {
                return Err(app_err!("close refused"));
            }
            Ok(())
        }
    }

    fn point(n: i64) -> MetricPoint {
        MetricPoint::from_record_at(MetricRecord::new("m").with_field("n", FieldValue::Int(n)), n).unwrap()
    }

    #[tokio::test]
    async fn test_outbox_flushes_when_full_and_on_close() {
        let mut writer = RecordingWriter::default();
        let mut adapter = SinkAdapter::with_capacity(&mut writer, 2);

        adapter.write_many((1..=5).map(point)).await.unwrap();
        assert_eq!(adapter.written(), 4);
        assert_eq!(adapter.pending(), 1);

        assert_eq!(adapter.close().await.unwrap(), 5);
        assert_eq!(writer.batches, vec![vec![1, 2], vec![3, 4], vec![5]]);
        assert!(writer.closed);
    }

    #[tokio::test]
    async fn test_close_with_nothing_pending_still_closes_writer() {
        let mut writer = RecordingWriter::default();
        let adapter = SinkAdapter::new(&mut writer);

        assert_eq!(adapter.close().await.unwrap(), 0);
        assert!(writer.batches.is_empty());
        assert!(writer.closed);
    }

    #[tokio::test]
    async fn test_scoped_drains_and_closes() {
        let mut writer = RecordingWriter::default();

        let value = SinkAdapter::scoped(&mut writer, 10, async |sink| {
            sink.write_one(point(1)).await?;
            sink.write_one(point(2)).await?;
            Ok(7)
        })
        .await
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(writer.batches, vec![vec![1, 2]]);
        assert!(writer.closed);
    }

    #[tokio::test]
    async fn test_scoped_closes_when_body_fails() {
        let mut writer = RecordingWriter::default();

        let err = SinkAdapter::scoped(&mut writer, 10, async |_sink| -> Result<()> { Err(app_err!("cycle failed")) })
            .await
            .unwrap_err();

        assert!(err.to_string().contains("cycle failed"));
        assert!(writer.batches.is_empty());
        assert!(writer.closed);
    }

    #[tokio::test]
    async fn test_scoped_prefers_body_error_over_close_error() {
        let mut writer = RecordingWriter {
            fail_close: true,
            ..RecordingWriter::default()
        };

        let err = SinkAdapter::scoped(&mut writer, 10, async |_sink| -> Result<()> { Err(app_err!("cycle failed")) })
            .await
            .unwrap_err();

        assert!(err.to_string().contains("cycle failed"));
        assert!(writer.closed);
    }

    #[tokio::test]
    async fn test_scoped_reports_close_error_after_successful_body() {
        let mut writer = RecordingWriter {
            fail_writes: true,
            ..RecordingWriter::default()
        };

        let err = SinkAdapter::scoped(&mut writer, 10, async |sink| sink.write_one(point(1)).await)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("write refused"));
        assert!(writer.closed);
    }
}
