use serde::{Deserialize, Serialize};
use tracing::debug;

use marketseed_core::{FieldValue, Row, RowSink};

use crate::errors::GenerationError;

/// When buffered rows are handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    /// Flush each time the buffer reaches this many rows, then once more on finish.
    EveryRows(usize),
    /// Buffer everything and flush once on finish.
    OnFinish,
}

/// Totals for one writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows_written: u64,
    pub commits: u64,
}

/// Buffered writer for a single table.
///
/// Rows accumulate in memory and are flushed to the sink as one committed
/// batch per threshold. [`BatchWriter::finish`] flushes the remainder, so the
/// number of rows written always equals the number pushed.
pub struct BatchWriter<'s, R: Row> {
    sink: &'s mut dyn RowSink,
    policy: FlushPolicy,
    buffer: Vec<R>,
    summary: BatchSummary,
}

impl<'s, R: Row> BatchWriter<'s, R> {
    pub fn new(sink: &'s mut dyn RowSink, policy: FlushPolicy) -> Self {
        let capacity = match policy {
            FlushPolicy::EveryRows(threshold) => threshold.min(DEFAULT_BUFFER_HINT),
            FlushPolicy::OnFinish => 0,
        };
        Self {
            sink,
            policy,
            buffer: Vec::with_capacity(capacity),
            summary: BatchSummary::default(),
        }
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub async fn push(&mut self, row: R) -> Result<(), GenerationError> {
        self.buffer.push(row);
        if let FlushPolicy::EveryRows(threshold) = self.policy {
            if self.buffer.len() >= threshold {
                self.flush().await?;
            }
        }
        Ok(())
    }

    pub async fn extend<I>(&mut self, rows: I) -> Result<(), GenerationError>
    where
        I: IntoIterator<Item = R>,
    {
        for row in rows {
            self.push(row).await?;
        }
        Ok(())
    }

    /// Hand the buffered rows to the sink. Empty buffers are not flushed.
    pub async fn flush(&mut self) -> Result<(), GenerationError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let rows: Vec<Vec<FieldValue>> = self.buffer.drain(..).map(|row| row.values()).collect();
        let written = self.sink.write_batch(R::TABLE, rows).await?;
        self.summary.rows_written += written;
        self.summary.commits += 1;

        debug!(
            table = R::TABLE.name,
            rows = written,
            rows_written = self.summary.rows_written,
            commits = self.summary.commits,
            "batch flushed"
        );
        Ok(())
    }

    pub async fn finish(mut self) -> Result<BatchSummary, GenerationError> {
        self.flush().await?;
        Ok(self.summary)
    }
}

const DEFAULT_BUFFER_HINT: usize = 16_384;

#[cfg(test)]
mod tests {
    use marketseed_core::JobKey;
    use uuid::Uuid;

    use super::*;
    use crate::memory::MemorySink;

    fn key(n: usize) -> JobKey {
        JobKey {
            job_id: Uuid::nil(),
            key: format!("key-{n}"),
        }
    }

    #[tokio::test]
    async fn remainder_is_flushed_on_finish() {
        let mut sink = MemorySink::new();
        let mut writer = BatchWriter::new(&mut sink, FlushPolicy::EveryRows(10));
        for n in 0..25 {
            writer.push(key(n)).await.expect("push");
        }
        assert_eq!(writer.buffered(), 5);
        let summary = writer.finish().await.expect("finish");

        assert_eq!(summary.rows_written, 25);
        assert_eq!(summary.commits, 3);
        assert_eq!(sink.row_count("job_keys"), 25);
        assert_eq!(sink.commits("job_keys"), 3);
    }

    #[tokio::test]
    async fn exact_multiple_does_not_add_empty_commit() {
        let mut sink = MemorySink::new();
        let mut writer = BatchWriter::new(&mut sink, FlushPolicy::EveryRows(10));
        writer.extend((0..20).map(key)).await.expect("extend");
        let summary = writer.finish().await.expect("finish");

        assert_eq!(summary.rows_written, 20);
        assert_eq!(summary.commits, 2);
    }

    #[tokio::test]
    async fn on_finish_commits_once() {
        let mut sink = MemorySink::new();
        let mut writer = BatchWriter::new(&mut sink, FlushPolicy::OnFinish);
        writer.extend((0..42).map(key)).await.expect("extend");
        assert_eq!(writer.buffered(), 42);
        let summary = writer.finish().await.expect("finish");

        assert_eq!(summary, BatchSummary { rows_written: 42, commits: 1 });
    }

    #[tokio::test]
    async fn nothing_pushed_means_no_commit() {
        let mut sink = MemorySink::new();
        let writer: BatchWriter<'_, JobKey> = BatchWriter::new(&mut sink, FlushPolicy::OnFinish);
        let summary = writer.finish().await.expect("finish");

        assert_eq!(summary, BatchSummary::default());
        assert!(sink.table("job_keys").is_none());
    }
}
