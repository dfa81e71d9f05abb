//! In-memory case storage
//!
//! Implements `CaseStore` with an insertion-ordered vector and an id index,
//! both behind one `Mutex`. Every read and write is serialized; cases are
//! small and every operation is short, so a single lock is enough.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::core::CaseError;
use crate::core::models::Case;
use crate::core::ports::CaseStore;

#[derive(Debug, Default)]
struct Cases {
    order: Vec<Case>,
    index: HashMap<String, usize>,
}

/// Case store held in process memory
///
/// Cases are never removed, so positions in `order` stay valid for the
/// lifetime of the store.
#[derive(Debug, Default)]
pub struct InMemoryCaseStore {
    cases: Mutex<Cases>,
}

impl InMemoryCaseStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Cases>, CaseError> {
        self.cases
            .lock()
            .map_err(|_| CaseError::Storage("case store lock poisoned".to_string()))
    }
}

impl CaseStore for InMemoryCaseStore {
    fn list(&self) -> Result<Vec<Case>, CaseError> {
        Ok(self.lock()?.order.clone())
    }

    fn append(&self, case: Case) -> Result<(), CaseError> {
        let mut cases = self.lock()?;
        if cases.index.contains_key(&case.id) {
            return Err(CaseError::DuplicateId(case.id));
        }
        let position = cases.order.len();
        cases.index.insert(case.id.clone(), position);
        cases.order.push(case);
        Ok(())
    }

    fn find(&self, id: &str) -> Result<Option<Case>, CaseError> {
        let cases = self.lock()?;
        Ok(cases.index.get(id).map(|&i| cases.order[i].clone()))
    }

    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Case) -> Result<(), CaseError>,
    ) -> Result<Case, CaseError> {
        let mut cases = self.lock()?;
        let position = *cases
            .index
            .get(id)
            .ok_or_else(|| CaseError::NotFound(id.to_string()))?;

        // Work on a copy so a failing closure leaves the stored case intact
        let mut updated = cases.order[position].clone();
        apply(&mut updated)?;
        cases.order[position] = updated.clone();
        Ok(updated)
    }

    fn len(&self) -> Result<usize, CaseError> {
        Ok(self.lock()?.order.len())
    }

    fn contains(&self, id: &str) -> Result<bool, CaseError> {
        Ok(self.lock()?.index.contains_key(id))
    }
}
