use crate::pick::ObjectId;
use smallvec::SmallVec;

/// Objects the outline stage should highlight this frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSignal {
    selected: SmallVec<[ObjectId; 1]>,
}

impl SelectionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Replace the selection with `id` (or nothing). Returns whether it changed.
    pub fn set(&mut self, id: Option<ObjectId>) -> bool {
        let changed = self.selected.as_slice() != id.as_slice();
        if changed {
            self.selected.clear();
            self.selected.extend(id);
        }
        changed
    }

    pub fn clear(&mut self) -> bool {
        self.set(None)
    }
}
