//! Row and record visitors
//!
//! A visitor applies every root of a transform to the rows (or records) a
//! [`RowSource`] hands out. Two flavors are provided:
//!
//! - [`PreviewVisitor`]: collects into an in-memory graph and stops after
//!   `sample_limit` rows/records. Failures are logged and end the preview.
//! - [`ExportVisitor`]: buffers into a [`GraphCollector`] and flushes
//!   de-duplicated triples to a downstream sink. Sink failures abort the
//!   export.
//!
//! Use [`visit_rows`] or [`visit_records`] to drive either one.

use crate::config::TransformConfig;
use crate::error::TransformResult;
use crate::host::{ExpressionEvaluator, RowSource};
use crate::mapping::Node;
use crate::materialize::EvalContext;
use crate::record::Record;
use crate::sink::{GraphCollector, TripleSink};
use crate::transform::RdfTransform;

/// Receives rows from [`visit_rows`]
pub trait RowVisitor {
    /// Called once before the first row
    fn start(&mut self) {}

    /// Visit one row; `Ok(true)` stops the walk
    fn visit_row(&mut self, row: usize) -> TransformResult<bool>;

    /// Called once after the last visited row
    fn end(&mut self) -> TransformResult<()> {
        Ok(())
    }
}

/// Receives records from [`visit_records`]
pub trait RecordVisitor {
    fn start(&mut self) {}

    /// Visit one record; `Ok(true)` stops the walk
    fn visit_record(&mut self, record: Record) -> TransformResult<bool>;

    fn end(&mut self) -> TransformResult<()> {
        Ok(())
    }
}

/// Walk rows `0..row_count` in order
pub fn visit_rows<V>(source: &dyn RowSource, visitor: &mut V) -> TransformResult<()>
where
    V: RowVisitor + ?Sized,
{
    visitor.start();
    for row in 0..source.row_count() {
        if visitor.visit_row(row)? {
            tracing::debug!(row, "Row visitation stopped");
            break;
        }
    }
    visitor.end()
}

/// Walk the source's records in order
pub fn visit_records<V>(source: &dyn RowSource, visitor: &mut V) -> TransformResult<()>
where
    V: RecordVisitor + ?Sized,
{
    visitor.start();
    for record in source.records() {
        if visitor.visit_record(record)? {
            tracing::debug!(from_row = record.from_row, "Record visitation stopped");
            break;
        }
    }
    visitor.end()
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Row(usize),
    Record(Record),
}

impl Unit {
    fn apply(self, root: &Node, ctx: &mut EvalContext<'_>) -> TransformResult<()> {
        match self {
            Unit::Row(row) => root.create_statements_for_row(ctx, row).map(drop),
            Unit::Record(record) => root.create_statements_for_record(ctx, record).map(drop),
        }
    }
}

/// Bounded visitor for interactive previews
pub struct PreviewVisitor<'a> {
    transform: &'a RdfTransform,
    evaluator: &'a dyn ExpressionEvaluator,
    config: &'a TransformConfig,
    graph: GraphCollector,
    count: usize,
}

impl<'a> PreviewVisitor<'a> {
    pub fn new(
        transform: &'a RdfTransform,
        evaluator: &'a dyn ExpressionEvaluator,
        config: &'a TransformConfig,
    ) -> Self {
        if config.debug {
            tracing::debug!(sample_limit = config.sample_limit, "Created preview visitor");
        }
        Self {
            transform,
            evaluator,
            config,
            graph: GraphCollector::new(),
            count: 0,
        }
    }

    /// Rows/records successfully previewed so far
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn graph(&self) -> &GraphCollector {
        &self.graph
    }

    pub fn into_graph(self) -> GraphCollector {
        self.graph
    }

    fn begin(&mut self) {
        if self.config.is_verbose() {
            tracing::debug!("Starting preview");
        }
        self.transform.announce_prefixes(&mut self.graph);
    }

    fn visit(&mut self, unit: Unit) -> bool {
        let limit = self.config.sample_limit;
        if limit > 0 && self.count >= limit {
            return true;
        }
        if self.config.is_verbose() {
            tracing::debug!(unit = ?unit, count = self.count, "Previewing");
        }

        let transform = self.transform;
        let mut ctx = transform.context(self.evaluator, &mut self.graph, self.config);
        for root in transform.roots() {
            if let Err(e) = unit.apply(root, &mut ctx) {
                tracing::error!(unit = ?unit, error = %e, "Preview stopped");
                return true;
            }
        }
        self.count += 1;
        false
    }
}

impl RowVisitor for PreviewVisitor<'_> {
    fn start(&mut self) {
        self.begin();
    }

    fn visit_row(&mut self, row: usize) -> TransformResult<bool> {
        Ok(self.visit(Unit::Row(row)))
    }
}

impl RecordVisitor for PreviewVisitor<'_> {
    fn start(&mut self) {
        self.begin();
    }

    fn visit_record(&mut self, record: Record) -> TransformResult<bool> {
        Ok(self.visit(Unit::Record(record)))
    }
}

/// Buffered visitor that writes to a downstream sink
pub struct ExportVisitor<'a, S: TripleSink> {
    transform: &'a RdfTransform,
    evaluator: &'a dyn ExpressionEvaluator,
    config: &'a TransformConfig,
    buffer: GraphCollector,
    sink: S,
    written: usize,
    limit_warned: bool,
}

impl<'a, S: TripleSink> ExportVisitor<'a, S> {
    pub fn new(
        transform: &'a RdfTransform,
        evaluator: &'a dyn ExpressionEvaluator,
        config: &'a TransformConfig,
        sink: S,
    ) -> Self {
        if config.debug {
            tracing::debug!(export_limit = config.export_limit, "Created export visitor");
        }
        Self {
            transform,
            evaluator,
            config,
            buffer: GraphCollector::new(),
            sink,
            written: 0,
            limit_warned: false,
        }
    }

    /// Triples written to the downstream sink so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Write the de-duplicated buffer to the sink
    pub fn flush(&mut self) -> TransformResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.buffer.dedupe();
        let batch = self.buffer.drain();
        let size = batch.len();
        for triple in batch {
            self.sink.emit_triple(triple)?;
        }
        self.written += size;
        if self.config.is_verbose() {
            tracing::debug!(size, total = self.written, "Flushed export buffer");
        }
        Ok(())
    }

    fn begin(&mut self) {
        if self.config.is_verbose() {
            tracing::debug!("Starting export");
        }
        self.transform.announce_prefixes(&mut self.sink);
    }

    fn visit(&mut self, unit: Unit) -> TransformResult<bool> {
        if self.config.is_verbose() {
            tracing::debug!(unit = ?unit, "Exporting");
        }
        let transform = self.transform;
        for root in transform.roots() {
            {
                let mut ctx = transform.context(self.evaluator, &mut self.buffer, self.config);
                unit.apply(root, &mut ctx)?;
            }
            if self.buffer.len() > self.config.export_limit {
                if !self.limit_warned {
                    self.limit_warned = true;
                    tracing::warn!(
                        limit = self.config.export_limit,
                        "Export buffer limit reached, flushing mid-visit"
                    );
                }
                self.flush()?;
            }
        }
        self.flush()?;
        Ok(false)
    }

    fn finish(&mut self) -> TransformResult<()> {
        self.flush()?;
        if self.config.is_verbose() {
            tracing::debug!(written = self.written, "Export finished");
        }
        Ok(())
    }
}

impl<S: TripleSink> RowVisitor for ExportVisitor<'_, S> {
    fn start(&mut self) {
        self.begin();
    }

    fn visit_row(&mut self, row: usize) -> TransformResult<bool> {
        self.visit(Unit::Row(row))
    }

    fn end(&mut self) -> TransformResult<()> {
        self.finish()
    }
}

impl<S: TripleSink> RecordVisitor for ExportVisitor<'_, S> {
    fn start(&mut self) {
        self.begin();
    }

    fn visit_record(&mut self, record: Record) -> TransformResult<bool> {
        self.visit(Unit::Record(record))
    }

    fn end(&mut self) -> TransformResult<()> {
        self.finish()
    }
}
