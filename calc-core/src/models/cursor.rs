use serde::{Deserialize, Serialize};

use super::tvm::TvmField;

/// Position within the TVM worksheet's ordered field list.
///
/// Purely a navigation aid: it decides which field a compute or store
/// action targets, and clamps at both ends of the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetCursor {
    index: usize,
}

impl WorksheetCursor {
    pub fn field(&self) -> TvmField {
        TvmField::ALL[self.index]
    }

    pub fn move_up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.index = (self.index + 1).min(TvmField::ALL.len() - 1);
    }

    pub fn move_to(
        &mut self,
        field: TvmField,
    ) {
        // ALL contains every variant, so position always succeeds.
        self.index = TvmField::ALL.iter().position(|f| *f == field).unwrap_or(0);
    }
}
