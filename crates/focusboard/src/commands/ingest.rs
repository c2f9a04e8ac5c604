use focusboard_store::{CsvRecordStore, SessionRecord};
use serde::Deserialize;

/// Envelope returned by the history endpoint
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    data: Vec<RemoteSession>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteSession {
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    time: u32,
    #[serde(default)]
    elapsed: u32,
    #[serde(default)]
    goal: Option<String>,
    #[serde(default)]
    ended: bool,
    #[serde(default)]
    work: Option<String>,
}

impl From<RemoteSession> for SessionRecord {
    fn from(remote: RemoteSession) -> Self {
        SessionRecord::new(
            remote.created_at,
            remote.time,
            remote.elapsed,
            remote.goal.unwrap_or_default(),
            remote.ended,
            remote.work.unwrap_or_default(),
        )
    }
}

pub fn run(user: Option<&str>) -> anyhow::Result<()> {
    let (paths, config) = super::load_config()?;

    let Some(user_id) = user.or(config.user_id.as_deref()) else {
        anyhow::bail!("No user id. Pass --user, set user_id in config.json or FOCUSBOARD_USER_ID.");
    };
    let Some(token) = config.api_token.as_deref() else {
        anyhow::bail!("FOCUSBOARD_API_TOKEN is not set.");
    };

    let url = history_url(&config.history_api_base, user_id);
    let body = super::runtime()?.block_on(fetch(&url, token))?;
    let records = parse_history(&body)?;

    let store = CsvRecordStore::new(config.data_file(&paths));
    store.replace(&records)?;

    println!(
        "✓ Ingested {} sessions into {}",
        records.len(),
        store.path().display()
    );
    Ok(())
}

fn history_url(base: &str, user_id: &str) -> String {
    format!("{}/api/history/{}", base.trim_end_matches('/'), user_id)
}

async fn fetch(url: &str, token: &str) -> anyhow::Result<String> {
    let response = reqwest::Client::new()
        .get(url)
        .bearer_auth(token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("History API returned HTTP {}", status);
    }
    Ok(response.text().await?)
}

/// Decode the history body into records ordered by start time
fn parse_history(body: &str) -> anyhow::Result<Vec<SessionRecord>> {
    let response: HistoryResponse = serde_json::from_str(body)?;
    let mut records: Vec<SessionRecord> = response.data.into_iter().map(Into::into).collect();
    sort_by_start(&mut records);

    let invalid = records.iter().filter(|r| !r.has_valid_timestamp()).count();
    if invalid > 0 {
        tracing::warn!(invalid, "sessions with unparseable createdAt kept at the end");
    }
    Ok(records)
}

// Stable; unparseable timestamps sort last in their original order.
fn sort_by_start(records: &mut [SessionRecord]) {
    records.sort_by_key(|r| (r.created_at.is_none(), r.created_at));
}
