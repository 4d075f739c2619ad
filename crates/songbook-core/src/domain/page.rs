use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// 1-indexed page of a listing. A zero `limit` means "no bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
  pub page: u32,
  pub limit: u32,
}

impl PageRequest {
  pub fn new(page: u32, limit: u32) -> Self {
    Self { page, limit }
  }

  /// Unbounded listing: neither LIMIT nor OFFSET is emitted.
  pub fn all() -> Self {
    Self { page: 1, limit: 0 }
  }

  /// `(page - 1) * limit`; page 0 is treated like page 1.
  pub fn offset(&self) -> u64 {
    u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
  }
}
