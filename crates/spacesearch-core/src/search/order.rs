use crate::models::ResultRecord;

/// Stable reorder putting every document ahead of every block. Relative
/// order inside each group, and therefore space priority, is kept.
pub fn order_results(mut records: Vec<ResultRecord>) -> Vec<ResultRecord> {
    records.sort_by_key(|record| record.kind.display_rank());
    records
}
