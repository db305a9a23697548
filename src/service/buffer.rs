use crate::error::{GatewayError, Result};
use crate::models::Transaction;

/// Fixed-size arena holding one fetch outcome per transaction index.
///
/// Each slot is owned by exactly one index and written at most once, so the
/// collected outcome never depends on the order fetches finished in.
pub struct IndexedSlots {
    slots: Vec<Option<Result<Transaction>>>,
}

impl IndexedSlots {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| None).collect(),
        }
    }

    /// Records the outcome for `index`. Returns `false` if the index is out of
    /// range or already holds an outcome; the slot is left untouched then.
    pub fn insert(&mut self, index: usize, outcome: Result<Transaction>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(outcome);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[cfg(test)]
    fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[cfg(test)]
    fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Transactions in index order, or the error of the lowest failed index.
    /// An index that never reported counts as aborted.
    pub fn into_transactions(self) -> Result<Vec<Transaction>> {
        let mut transactions = Vec::with_capacity(self.slots.len());

        for (index, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Some(Ok(tx)) => transactions.push(tx),
                Some(Err(e)) => return Err(e),
                None => {
                    return Err(GatewayError::FetchAborted(format!(
                        "no outcome recorded for transaction index {index}"
                    )))
                }
            }
        }

        Ok(transactions)
    }
}
