use crate::schema::songs;

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

/// A `songs` row as returned by the listing statement.
#[derive(Debug, QueryableByName)]
#[diesel(table_name = songs)]
pub struct SongRow {
  pub id: Uuid,
  pub group_name: Option<String>,
  pub song_name: Option<String>,
  pub release_date: Option<NaiveDate>,
  pub text: Option<String>,
  pub link: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = songs)]
pub struct NewSongRow<'a> {
  pub group_name: Option<&'a str>,
  pub song_name: Option<&'a str>,
  pub release_date: Option<NaiveDate>,
  pub text: Option<&'a str>,
  pub link: Option<&'a str>,
}
