use crate::record::PaperRecord;

/// Destination for assembled records.
///
/// One call per record, no batching. A failed insert must leave the sink
/// usable for the next record.
pub trait RecordSink {
    fn insert(&mut self, record: &PaperRecord) -> anyhow::Result<()>;
}
