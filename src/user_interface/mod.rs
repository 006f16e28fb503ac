pub mod editable_fields;

/// Whether an editor widget changed the value it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EditState {
    NoChange,
    Modified,
}

impl EditState {
    pub fn combine(self, other: Self) -> Self {
        self.max(other)
    }

    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Modified
        } else {
            Self::NoChange
        }
    }
}
