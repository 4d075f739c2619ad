use crate::domain::ids::SongId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layouts accepted for release dates, tried in order. The provider
/// speaks `16.07.2006`; everything else in the system speaks ISO.
const RELEASE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// A catalog entry as stored. Every field except the id may be unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  pub id: SongId,
  /// Performing group or artist.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub group: Option<String>,
  #[serde(rename = "song", skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub release_date: Option<NaiveDate>,
  /// Full lyrics, verses separated by a blank line.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,
}

/// What a caller supplies to create a song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSong {
  pub group: String,
  #[serde(rename = "song")]
  pub title: String,
}

/// Metadata the external provider knows about a song.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongDetails {
  pub release_date: Option<NaiveDate>,
  pub text: Option<String>,
  pub link: Option<String>,
}

/// A record ready to be inserted: the caller's group and title merged with
/// whatever the provider returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
  pub group: String,
  pub title: String,
  pub release_date: Option<NaiveDate>,
  pub text: Option<String>,
  pub link: Option<String>,
}

impl NewSong {
  /// A bare record; everything but group and title is filled in later.
  pub fn bare(group: impl Into<String>, title: impl Into<String>) -> Self {
    Self { group: group.into(), title: title.into(), release_date: None, text: None, link: None }
  }

  pub fn enriched(request: AddSong, details: SongDetails) -> Self {
    Self {
      group: request.group,
      title: request.title,
      release_date: details.release_date,
      text: details.text,
      link: details.link,
    }
  }
}

/// Sparse update. `None` leaves the stored value alone; `Some("")` really
/// does overwrite it with an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongPatch {
  pub group: Option<String>,
  #[serde(rename = "song")]
  pub title: Option<String>,
  pub release_date: Option<NaiveDate>,
  pub text: Option<String>,
  pub link: Option<String>,
}

impl SongPatch {
  pub fn is_empty(&self) -> bool {
    self.group.is_none()
      && self.title.is_none()
      && self.release_date.is_none()
      && self.text.is_none()
      && self.link.is_none()
  }
}

/// Raw listing filters as they arrive from the boundary. An empty string is
/// the same as no filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongFilter {
  pub group: Option<String>,
  #[serde(rename = "song")]
  pub title: Option<String>,
  pub release_date: Option<String>,
}

impl SongFilter {
  pub fn group(&self) -> Option<&str> {
    non_empty(&self.group)
  }

  pub fn title(&self) -> Option<&str> {
    non_empty(&self.title)
  }

  pub fn release_date(&self) -> Option<&str> {
    non_empty(&self.release_date)
  }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.is_empty())
}

/// Parses a release date in any of the accepted layouts.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  RELEASE_DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
