//! Verse pagination over stored lyric text.
//!
//! A verse is a block separated from its neighbours by a blank line. Pages are
//! 1-indexed and hold `VERSES_PER_PAGE` verses.

use crate::errors::CoreError;

pub const VERSE_SEPARATOR: &str = "\n\n";
pub const VERSES_PER_PAGE: usize = 1;

/// Splits on every blank line. Leading or trailing separators produce empty
/// verses, which are kept as they are.
pub fn split_into_verses(text: &str) -> Vec<&str> {
  text.split(VERSE_SEPARATOR).collect()
}

/// Returns the verses of `page`, where `page` is the raw value the caller
/// received (e.g. a query string parameter).
pub fn paginate_verses<'a, T>(verses: &'a [T], page: &str) -> Result<&'a [T], CoreError> {
  let page_num = match page.parse::<usize>() {
    Ok(n) if n >= 1 => n,
    _ => return Err(CoreError::InvalidPage),
  };

  let start = (page_num - 1).saturating_mul(VERSES_PER_PAGE);
  if start >= verses.len() {
    return Err(CoreError::PageOutOfRange);
  }

  let end = start.saturating_add(VERSES_PER_PAGE).min(verses.len());
  Ok(&verses[start..end])
}

/// Joins a page back into text for the caller.
pub fn join_verses(verses: &[&str]) -> String {
  verses.join(VERSE_SEPARATOR)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn splits_on_blank_lines() {
    assert_eq!(split_into_verses("a\n\nb\n\nc"), vec!["a", "b", "c"]);
  }

  #[test]
  fn single_newlines_stay_inside_a_verse() {
    assert_eq!(split_into_verses("line 1\nline 2\n\nchorus"), vec!["line 1\nline 2", "chorus"]);
  }

  #[test]
  fn stray_separators_yield_empty_verses() {
    assert_eq!(split_into_verses("\n\na\n\n"), vec!["", "a", ""]);
  }

  #[test]
  fn picks_one_verse_per_page() {
    let verses = ["a", "b", "c"];
    assert_eq!(paginate_verses(&verses, "1").unwrap(), &["a"]);
    assert_eq!(paginate_verses(&verses, "2").unwrap(), &["b"]);
    assert_eq!(paginate_verses(&verses, "3").unwrap(), &["c"]);
  }

  #[test]
  fn rejects_pages_below_one_or_unparseable() {
    let verses = ["a", "b", "c"];
    for page in ["0", "-1", "two", "", "1.5"] {
      assert_eq!(paginate_verses(&verses, page), Err(CoreError::InvalidPage), "page {page:?}");
    }
  }

  #[test]
  fn pages_past_the_end_are_out_of_range() {
    let verses = ["a", "b", "c"];
    assert_eq!(paginate_verses(&verses, "4"), Err(CoreError::PageOutOfRange));
    assert_eq!(paginate_verses(&verses, "10"), Err(CoreError::PageOutOfRange));
    assert_eq!(paginate_verses::<&str>(&[], "1"), Err(CoreError::PageOutOfRange));
  }

  #[test]
  fn huge_page_numbers_do_not_overflow() {
    let verses = ["a"];
    assert_eq!(paginate_verses(&verses, &usize::MAX.to_string()), Err(CoreError::PageOutOfRange));
  }

  #[test]
  fn join_restores_separator() {
    assert_eq!(join_verses(&["a", "b"]), "a\n\nb");
    assert_eq!(join_verses(&["only"]), "only");
  }
}
