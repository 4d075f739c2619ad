use serde::Deserialize;

use songbook_core::domain::{SongDetails, parse_release_date};
use songbook_core::ports::MetadataError;

/// Body of `GET /info`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InfoResponse {
  #[serde(default)]
  pub release_date: Option<String>,
  #[serde(default)]
  pub text: Option<String>,
  #[serde(default)]
  pub link: Option<String>,
}

/// Blank strings count as missing. A release date in an unknown layout is
/// corrupt data, not a missing field.
pub(crate) fn to_details(info: InfoResponse) -> Result<SongDetails, MetadataError> {
  let release_date = match non_blank(info.release_date) {
    Some(raw) => Some(
      parse_release_date(&raw).ok_or_else(|| MetadataError::Corrupt(format!("releaseDate {raw:?}")))?,
    ),
    None => None,
  };

  Ok(SongDetails { release_date, text: non_blank(info.text), link: non_blank(info.link) })
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_provider_payload() {
    let info: InfoResponse = serde_json::from_str(
      r#"{
        "releaseDate": "16.07.2006",
        "text": "Ooh baby, don't you know I suffer?\n\nOoh baby, can you hear me moan?",
        "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
      }"#,
    )
    .unwrap();

    let details = to_details(info).unwrap();
    assert_eq!(details.release_date, parse_release_date("2006-07-16"));
    assert!(details.release_date.is_some());
    assert!(details.text.unwrap().contains("\n\n"));
    assert_eq!(details.link.as_deref(), Some("https://www.youtube.com/watch?v=Xsp3_a-PMTw"));
  }

  #[test]
  fn missing_and_blank_fields_become_none() {
    let info: InfoResponse = serde_json::from_str(r#"{"releaseDate": "", "text": "  "}"#).unwrap();

    assert_eq!(to_details(info).unwrap(), SongDetails::default());
  }

  #[test]
  fn unknown_date_layout_is_corrupt() {
    let info = InfoResponse { release_date: Some("July 16th".into()), ..InfoResponse::default() };

    assert!(matches!(to_details(info), Err(MetadataError::Corrupt(_))));
  }
}
