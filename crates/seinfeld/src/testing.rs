//! Synthetic transcript database shared by the tests.
//!
//! Shape:
//! - 9 seasons with [`EPISODES_PER_SEASON`] episodes, ids assigned in
//!   season/episode order (173 in total).
//! - Episode 1 has [`EPISODE_ONE_LINES`] utterances with ids equal to their
//!   numbers, cycling through the main cast. Utterance 5 has two sentences,
//!   utterance 78 is George's "You're gonna overdry it.".
//! - Episode 26 has utterances 81..=83 (numbers 221..=223): Jerry and George
//!   talking about parking and mothers.
//! - Episode 2 has a single utterance (id 84) by Newman.
//!
//! Sentences are inserted in reverse order so that anything relying on
//! insertion order rather than `sentence_number` shows up.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool};
use sqlx::{Connection, SqliteConnection};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::repo::Repository;

pub(crate) const EPISODES_PER_SEASON: [u32; 9] = [4, 12, 23, 24, 21, 22, 24, 22, 21];
pub(crate) const EPISODE_ONE_LINES: u32 = 80;
const CAST: [&str; 4] = ["JERRY", "GEORGE", "ELAINE", "KRAMER"];

const SCHEMA: &str = r#"
    CREATE TABLE episode (
        id INTEGER PRIMARY KEY,
        season_number INTEGER NOT NULL,
        episode_number INTEGER NOT NULL,
        title TEXT NOT NULL,
        the_date TEXT NOT NULL,
        writer TEXT NOT NULL,
        director TEXT NOT NULL
    );
    CREATE TABLE utterance (
        id INTEGER PRIMARY KEY,
        episode_id INTEGER NOT NULL,
        utterance_number INTEGER NOT NULL,
        speaker TEXT NOT NULL
    );
    CREATE TABLE sentence (
        id INTEGER PRIMARY KEY,
        utterance_id INTEGER NOT NULL,
        sentence_number INTEGER NOT NULL,
        text TEXT NOT NULL
    );
"#;

pub(crate) struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    pub(crate) async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seinfeld.db");
        let fixture = Self { _dir: dir, path };
        let mut conn = fixture.connect().await;
        sqlx::raw_sql(SCHEMA).execute(&mut conn).await.unwrap();
        let mut tx = conn.begin().await.unwrap();
        insert_episodes(&mut tx).await;
        for number in 1..=EPISODE_ONE_LINES {
            let line = format!("Line {number}.");
            let sentences = match number {
                5 => vec!["First and", "second."],
                78 => vec!["You're gonna overdry it."],
                _ => vec![line.as_str()],
            };
            let speaker = CAST[(number as usize - 1) % CAST.len()];
            insert_utterance(&mut tx, i64::from(number), 1, i64::from(number), speaker, &sentences).await;
        }
        insert_utterance(&mut tx, 81, 26, 221, "JERRY", &["Your mother is crazy about parking."]).await;
        insert_utterance(
            &mut tx,
            82,
            26,
            222,
            "GEORGE",
            &["Mothers say things.", "My mother goes babbling on and on like a crazy person."],
        )
        .await;
        insert_utterance(&mut tx, 83, 26, 223, "JERRY", &["Parking is a nightmare.", "I hate parking."]).await;
        insert_utterance(&mut tx, 84, 2, 1, "NEWMAN", &["Hello, Jerry."]).await;
        tx.commit().await.unwrap();
        conn.close().await.unwrap();
        fixture
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Run a statement against the fixture through a writable connection.
    pub(crate) async fn execute(&self, sql: &str) {
        let mut conn = self.connect().await;
        sqlx::query(sql).execute(&mut conn).await.unwrap();
        conn.close().await.unwrap();
    }

    async fn connect(&self) -> SqliteConnection {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        SqliteConnection::connect_with(&options).await.unwrap()
    }
}

async fn insert_episodes(conn: &mut SqliteConnection) {
    let mut id = 0i64;
    for (season, count) in (1i64..).zip(EPISODES_PER_SEASON) {
        for number in 1..=i64::from(count) {
            id += 1;
            let (title, date, writer, director) = match id {
                1 => ("The Seinfeld Chronicles", "1989-07-05".to_string(), "LARRY DAVID, JERRY SEINFELD", "ART WOLFF"),
                2 => ("The Stakeout", "May 31, 1990".to_string(), "LARRY DAVID, JERRY SEINFELD", "TOM CHERONES"),
                26 => ("The Parking Garage", "1991-10-30".to_string(), "LARRY DAVID", "TOM CHERONES"),
                _ => ("Untitled", format!("{}-01-{number:02}", 1989 + season), "LARRY DAVID", "TOM CHERONES"),
            };
            sqlx::query(
                "INSERT INTO episode (id, season_number, episode_number, title, the_date, writer, director)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(id)
            .bind(season)
            .bind(number)
            .bind(title)
            .bind(date)
            .bind(writer)
            .bind(director)
            .execute(&mut *conn)
            .await
            .unwrap();
        }
    }
}

async fn insert_utterance(
    conn: &mut SqliteConnection,
    id: i64,
    episode_id: i64,
    number: i64,
    speaker: &str,
    sentences: &[&str],
) {
    sqlx::query("INSERT INTO utterance (id, episode_id, utterance_number, speaker) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(episode_id)
        .bind(number)
        .bind(speaker)
        .execute(&mut *conn)
        .await
        .unwrap();
    for (index, text) in sentences.iter().enumerate().rev() {
        sqlx::query("INSERT INTO sentence (utterance_id, sentence_number, text) VALUES (?, ?, ?)")
            .bind(id)
            .bind(index as i64 + 1)
            .bind(*text)
            .execute(&mut *conn)
            .await
            .unwrap();
    }
}

/// A repository whose pool never connects unless a query is issued.
pub(crate) fn lazy_repository() -> Repository {
    Repository::new(SqlitePool::connect_lazy("sqlite::memory:").unwrap())
}
