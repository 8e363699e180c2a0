//! Calendar sources: the GitHub GraphQL API and JSON files on disk.
//!
//! Both read the same `contributionCalendar` shape, so a response saved from
//! the API can be replayed offline with `--input`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, SecondsFormat, TimeDelta, Utc};
use etch_common::{CalendarError, CalendarSnapshot, DayRecord, WeekRecord};
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::{GITHUB_ACCEPT, GRAPHQL_URL, REQUEST_TIMEOUT, TOKEN_ENV};

const CALENDAR_QUERY: &str = "\
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          firstDay
          contributionDays { date contributionCount weekday }
        }
      }
    }
  }
}";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{var} is not set", var = TOKEN_ENV)]
    MissingToken,
    #[error("request failed: {0}")]
    Http(#[from] ureq::Error),
    #[error("GraphQL error: {0}")]
    GraphQl(String),
    #[error("no such user: {0}")]
    UnknownUser(String),
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("malformed calendar: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bad date {0:?}")]
    Date(String),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// Anything that can produce a fresh calendar snapshot.
pub trait CalendarSource {
    fn fetch(&mut self) -> Result<CalendarSnapshot, SourceError>;
}

impl<T: CalendarSource + ?Sized> CalendarSource for Box<T> {
    fn fetch(&mut self) -> Result<CalendarSnapshot, SourceError> { (**self).fetch() }
}

// =============================================================================
// Wire Format
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u32,
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub first_day: String,
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: String,
    pub contribution_count: u32,
    /// Signed and wide so a malformed value reaches the layout, which skips it.
    pub weekday: i64,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    errors: Option<Vec<GraphQlMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

/// Weekdays that don't fit a `u8` become `u8::MAX`, an out-of-range row.
fn weekday_row(weekday: i64) -> u8 { u8::try_from(weekday).unwrap_or(u8::MAX) }

fn parse_date(raw: &str) -> Result<NaiveDate, SourceError> {
    raw.parse::<NaiveDate>().map_err(|_| SourceError::Date(raw.to_owned()))
}

impl ContributionCalendar {
    /// Convert into the bounded snapshot the renderer works on.
    ///
    /// Weekdays are copied as given; out-of-range rows are the layout's
    /// concern, not a parse failure.
    pub fn into_snapshot(self) -> Result<CalendarSnapshot, SourceError> {
        let mut snapshot = CalendarSnapshot::new(self.total_contributions);
        for week in self.weeks {
            let mut record = WeekRecord::new(parse_date(&week.first_day)?);
            for day in week.contribution_days {
                let date = parse_date(&day.date)?;
                record.push_day(DayRecord::new(date, weekday_row(day.weekday), day.contribution_count))?;
            }
            snapshot.push_week(record)?;
        }
        Ok(snapshot)
    }
}

fn unwrap_response(
    response: GraphQlResponse,
    login: &str,
) -> Result<ContributionCalendar, SourceError> {
    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        let joined = errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
        return Err(SourceError::GraphQl(joined));
    }
    response
        .data
        .and_then(|d| d.user)
        .map(|u| u.contributions_collection.contribution_calendar)
        .ok_or_else(|| SourceError::UnknownUser(login.to_owned()))
}

// =============================================================================
// GitHub
// =============================================================================

/// Queries the trailing `days` of one account's calendar.
pub struct GithubSource {
    agent: ureq::Agent,
    token: String,
    login: String,
    days: u32,
}

impl GithubSource {
    /// Fails with [`SourceError::MissingToken`] when `token` is absent or blank.
    pub fn new(
        login: impl Into<String>,
        days: u32,
        token: Option<String>,
    ) -> Result<Self, SourceError> {
        let token = token.filter(|t| !t.trim().is_empty()).ok_or(SourceError::MissingToken)?;
        let config = ureq::Agent::config_builder().timeout_global(Some(REQUEST_TIMEOUT)).build();
        Ok(Self { agent: ureq::Agent::new_with_config(config), token, login: login.into(), days })
    }

    fn headers(&self) -> [(&'static str, String); 2] {
        [("Authorization", format!("Bearer {}", self.token)), ("Accept", GITHUB_ACCEPT.to_owned())]
    }
}

impl CalendarSource for GithubSource {
    fn fetch(&mut self) -> Result<CalendarSnapshot, SourceError> {
        let to = Utc::now();
        let from = to - TimeDelta::days(i64::from(self.days));
        let body = json!({
            "query": CALENDAR_QUERY,
            "variables": {
                "login": self.login,
                "from": from.to_rfc3339_opts(SecondsFormat::Secs, true),
                "to": to.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        });

        debug!("querying {} days of {} from {GRAPHQL_URL}", self.days, self.login);
        let mut request = self.agent.post(GRAPHQL_URL);
        for (name, value) in self.headers() {
            request = request.header(name, value);
        }
        let mut response = request.send_json(&body)?;
        let parsed: GraphQlResponse = response.body_mut().read_json()?;

        let snapshot = unwrap_response(parsed, &self.login)?.into_snapshot()?;
        info!(
            "fetched {} weeks for {}, {} contributions",
            snapshot.weeks().len(),
            self.login,
            snapshot.total_contributions()
        );
        Ok(snapshot)
    }
}

// =============================================================================
// File
// =============================================================================

/// Reads a saved `contributionCalendar` object on every fetch.
///
/// Re-reading lets an edited file show up on the next poll.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self { Self { path: path.as_ref().to_path_buf() } }
}

impl CalendarSource for FileSource {
    fn fetch(&mut self) -> Result<CalendarSnapshot, SourceError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| SourceError::Io { path: self.path.clone(), source })?;
        let calendar: ContributionCalendar = serde_json::from_str(&raw)?;
        let snapshot = calendar.into_snapshot()?;
        debug!("loaded {} weeks from {}", snapshot.weeks().len(), self.path.display());
        Ok(snapshot)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;

    use embedded_graphics::prelude::Size;
    use etch_common::{
        Bitmap, MAX_WEEKS, RenderConfig,
        config::{SCREEN_HEIGHT, SCREEN_WIDTH},
        widgets::render_calendar,
    };

    use super::*;

    const FIXTURE: &str = include_str!("../fixtures/calendar.json");

    #[test_log::test]
    fn test_fixture_parses() {
        let calendar: ContributionCalendar = serde_json::from_str(FIXTURE).unwrap();
        let snapshot = calendar.into_snapshot().unwrap();
        assert_eq!(snapshot.total_contributions(), 63);
        assert_eq!(snapshot.weeks().len(), 4);
        assert_eq!(snapshot.weeks()[0].first_day(), NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(snapshot.weeks()[3].days().len(), 4);
        let summed: u64 = snapshot.weeks().iter().map(WeekRecord::total).sum();
        assert_eq!(summed, 63);
    }

    #[test_log::test]
    fn test_bad_date_rejected() {
        let raw = r#"{"totalContributions":1,"weeks":[{"firstDay":"2024-13-01","contributionDays":[]}]}"#;
        let calendar: ContributionCalendar = serde_json::from_str(raw).unwrap();
        assert!(matches!(calendar.into_snapshot(), Err(SourceError::Date(d)) if d == "2024-13-01"));
    }

    #[test_log::test]
    fn test_out_of_range_weekday_kept_for_layout() {
        let raw = r#"{"totalContributions":2,"weeks":[{"firstDay":"2024-03-03",
            "contributionDays":[{"date":"2024-03-03","contributionCount":2,"weekday":9}]}]}"#;
        let calendar: ContributionCalendar = serde_json::from_str(raw).unwrap();
        let snapshot = calendar.into_snapshot().unwrap();
        assert_eq!(snapshot.weeks()[0].days()[0].weekday, 9);
        assert_eq!(snapshot.weeks()[0].days()[0].row(), None);
    }

    #[test_log::test]
    fn test_unrepresentable_weekday_skipped_at_layout() {
        let raw = r#"{"totalContributions":6,"weeks":[{"firstDay":"2024-03-03","contributionDays":[
            {"date":"2024-03-03","contributionCount":2,"weekday":-1},
            {"date":"2024-03-04","contributionCount":1,"weekday":1},
            {"date":"2024-03-05","contributionCount":3,"weekday":256}]}]}"#;
        let calendar: ContributionCalendar = serde_json::from_str(raw).unwrap();
        let snapshot = calendar.into_snapshot().unwrap();
        let days = snapshot.weeks()[0].days();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].weekday, u8::MAX);
        assert_eq!(days[2].weekday, u8::MAX);

        let mut frame = Bitmap::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)).unwrap();
        let report = render_calendar(&mut frame, &snapshot, &RenderConfig::new("alice")).unwrap();
        assert_eq!(report.cells_drawn, 1);
        assert_eq!(report.cells_skipped, 2);
    }

    #[test_log::test]
    fn test_eight_day_week_rejected() {
        let days: Vec<_> = (0..8)
            .map(|i| format!(r#"{{"date":"2024-03-0{}","contributionCount":0,"weekday":{}}}"#, i + 1, i % 7))
            .collect();
        let raw = format!(
            r#"{{"totalContributions":0,"weeks":[{{"firstDay":"2024-03-01","contributionDays":[{}]}}]}}"#,
            days.join(",")
        );
        let calendar: ContributionCalendar = serde_json::from_str(&raw).unwrap();
        assert!(matches!(calendar.into_snapshot(), Err(SourceError::Calendar(CalendarError::WeekFull(_)))));
    }

    #[test_log::test]
    fn test_too_many_weeks_rejected() {
        let weeks: Vec<_> = (0..=MAX_WEEKS).map(|_| r#"{"firstDay":"2024-01-07","contributionDays":[]}"#).collect();
        let raw = format!(r#"{{"totalContributions":0,"weeks":[{}]}}"#, weeks.join(","));
        let calendar: ContributionCalendar = serde_json::from_str(&raw).unwrap();
        assert!(matches!(calendar.into_snapshot(), Err(SourceError::Calendar(CalendarError::TooManyWeeks))));
    }

    #[test_log::test]
    fn test_graphql_errors_surface() {
        let raw = r#"{"data":null,"errors":[{"message":"Bad credentials"},{"message":"rate limited"}]}"#;
        let response: GraphQlResponse = serde_json::from_str(raw).unwrap();
        match unwrap_response(response, "alice") {
            Err(SourceError::GraphQl(msg)) => assert_eq!(msg, "Bad credentials; rate limited"),
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[test_log::test]
    fn test_unknown_user() {
        let response: GraphQlResponse = serde_json::from_str(r#"{"data":{"user":null}}"#).unwrap();
        assert!(matches!(unwrap_response(response, "nobody"), Err(SourceError::UnknownUser(u)) if u == "nobody"));
    }

    #[test_log::test]
    fn test_graphql_envelope_unwraps() {
        let raw = format!(
            r#"{{"data":{{"user":{{"contributionsCollection":{{"contributionCalendar":{FIXTURE}}}}}}}}}"#
        );
        let response: GraphQlResponse = serde_json::from_str(&raw).unwrap();
        let calendar = unwrap_response(response, "alice").unwrap();
        assert_eq!(calendar.total_contributions, 63);
    }

    #[test_log::test]
    fn test_missing_token() {
        assert!(matches!(GithubSource::new("alice", 126, None), Err(SourceError::MissingToken)));
        assert!(matches!(GithubSource::new("alice", 126, Some("  ".into())), Err(SourceError::MissingToken)));
        assert!(GithubSource::new("alice", 126, Some("ghp_test".into())).is_ok());
    }

    #[test_log::test]
    fn test_request_headers() {
        let source = GithubSource::new("alice", 126, Some("ghp_test".into())).unwrap();
        let headers = source.headers();
        assert!(headers.contains(&("Authorization", "Bearer ghp_test".to_owned())));
        assert!(headers.contains(&("Accept", "application/vnd.github+json".to_owned())));
    }

    #[test_log::test]
    fn test_file_source_reads_fixture() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let mut source = FileSource::new(file.path());
        assert_eq!(source.fetch().unwrap().total_contributions(), 63);
    }

    #[test_log::test]
    fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut source: Box<dyn CalendarSource> = Box::new(FileSource::new(dir.path().join("absent.json")));
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test_log::test]
    fn test_file_source_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"weeks\": 3}").unwrap();
        assert!(matches!(FileSource::new(file.path()).fetch(), Err(SourceError::Json(_))));
    }
}
