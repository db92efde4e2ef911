//! Batch planning — fixed-size groups that respect per-call payload
//! limits while preserving input order.

/// Articles sent per classification model call.
pub const CLASSIFY_BATCH_SIZE: usize = 10;

/// Partition `items` into ordered batches of `chunk_size`, last one
/// possibly smaller. Concatenating the batches reconstructs the input
/// exactly. Empty input yields no batches.
///
/// A zero chunk size is a caller contract violation and panics.
pub fn plan_batches<T>(items: &[T], chunk_size: usize) -> Vec<&[T]> {
    assert!(chunk_size > 0, "batch chunk size must be positive");
    items.chunks(chunk_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_three_items_make_10_10_3() {
        let items: Vec<u32> = (0..23).collect();
        let batches = plan_batches(&items, 10);
        let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![10, 10, 3]);
    }

    #[test]
    fn concatenation_reconstructs_input() {
        let items: Vec<u32> = (0..57).collect();
        let rebuilt: Vec<u32> = plan_batches(&items, 7).concat();
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn all_but_last_batch_are_full() {
        let items: Vec<u32> = (0..25).collect();
        let batches = plan_batches(&items, 4);
        for batch in &batches[..batches.len() - 1] {
            assert_eq!(batch.len(), 4);
        }
        assert!(batches.last().unwrap().len() <= 4);
    }

    #[test]
    fn exact_multiple_has_no_short_tail() {
        let items: Vec<u32> = (0..20).collect();
        let batches = plan_batches(&items, 10);
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 10));
    }

    #[test]
    fn empty_input_yields_no_batches() {
        let items: Vec<u32> = vec![];
        assert!(plan_batches(&items, 10).is_empty());
    }

    #[test]
    #[should_panic(expected = "chunk size must be positive")]
    fn zero_chunk_size_is_a_contract_violation() {
        let items = [1, 2, 3];
        let _ = plan_batches(&items, 0);
    }
}
