use super::model::Member;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task;

#[async_trait::async_trait]
pub trait MemberSource: Send + Sync {
    /// Where the records come from, for logging.
    fn name(&self) -> &str;

    /// Fetches the full member list.
    async fn fetch(&self) -> Result<Vec<Member>>;
}

#[derive(Debug, Clone)]
pub struct HttpMemberSource {
    client: reqwest::Client,
    url: String,
}

impl HttpMemberSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait::async_trait]
impl MemberSource for HttpMemberSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<Member>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", self.url))?;
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read body from {}", self.url))?;
        parse_members(&body)
    }
}

/// Decodes the feed payload: a JSON array of member objects.
pub fn parse_members(body: &str) -> Result<Vec<Member>> {
    serde_json::from_str(body).context("malformed member payload")
}

/// Runs the one-shot fetch in the background.
///
/// On failure the error is logged and the sender is dropped, so the receiver
/// resolves to `Err` and callers keep whatever they already had.
pub fn spawn_initial_load<S>(source: Arc<S>) -> oneshot::Receiver<Vec<Member>>
where
    S: MemberSource + ?Sized + 'static,
{
    let (tx, rx) = oneshot::channel();
    task::spawn(async move {
        log::info!("🚀 Fetching members from {}", source.name());
        match source.fetch().await {
            Ok(members) => {
                log::info!("✅ Fetched {} members", members.len());
                if tx.send(members).is_err() {
                    log::debug!("member receiver dropped before load finished");
                }
            }
            Err(e) => {
                log::error!("❌ Error fetching members from {}: {e:#}", source.name());
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::members::model::MemberId;

    struct FakeSource(Option<Vec<Member>>);

    #[async_trait::async_trait]
    impl MemberSource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch(&self) -> Result<Vec<Member>> {
            self.0.clone().context("fake fetch failure")
        }
    }

    #[test]
    fn parse_members_accepts_feed_shape() {
        let body = r#"[
            {"id":"1","name":"Aaron Miles","email":"aaron@mailinator.com","role":"member"},
            {"id":2,"name":"Aishwarya Naik","email":"aishwarya@mailinator.com","role":"admin","team":"core"}
        ]"#;
        let members = parse_members(body).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].id, MemberId::from("1"));
        assert_eq!(members[1].id, MemberId::from("2"));
        assert_eq!(members[1].role, "admin");
        assert_eq!(
            members[1].extra.get("team"),
            Some(&serde_json::Value::String("core".into()))
        );
    }

    #[test]
    fn parse_members_rejects_malformed_payloads() {
        assert!(parse_members("not json").is_err());
        assert!(parse_members(r#"{"id":"1"}"#).is_err());
        assert!(parse_members(r#"[{"id":"1","name":"A","email":"a@x.com"}]"#).is_err());
    }

    #[test]
    fn parse_members_accepts_empty_array() {
        assert!(parse_members("[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn initial_load_delivers_members() {
        let members = vec![Member::new("1", "A", "a@x.com", "admin")];
        let rx = spawn_initial_load(Arc::new(FakeSource(Some(members.clone()))));
        assert_eq!(rx.await.unwrap(), members);
    }

    #[tokio::test]
    async fn failed_load_delivers_nothing() {
        let rx = spawn_initial_load(Arc::new(FakeSource(None)));
        assert!(rx.await.is_err());
    }
}
