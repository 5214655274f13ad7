//! Import result DTOs

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Row counts for one snapshot file (or one record kind overall)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImportCounters {
    pub new_count: u32,
    pub updated_count: u32,
    pub duplicates_skipped: u32,
}

impl ImportCounters {
    pub fn total_saved(&self) -> u32 {
        self.new_count + self.updated_count
    }
}

impl AddAssign for ImportCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.new_count += rhs.new_count;
        self.updated_count += rhs.updated_count;
        self.duplicates_skipped += rhs.duplicates_skipped;
    }
}

/// Aggregated result of one `import_from` call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub files_processed: u32,
    pub files_skipped: u32,
    pub products: ImportCounters,
    pub discounts: ImportCounters,
}
