pub mod user_table;

#[tokio::test]
async fn test_initial_load_populates_table() {
    use crate::backend::members::{Member, MemberSource};
    use crate::config::Config;
    use crate::{App, wait_for_load};
    use std::sync::Arc;

    struct StaticSource(Vec<Member>);

    #[async_trait::async_trait]
    impl MemberSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self) -> anyhow::Result<Vec<Member>> {
            Ok(self.0.clone())
        }
    }

    let members: Vec<Member> = (1..=15u64)
        .map(|i| Member::new(i, format!("User {i}"), format!("user{i}@example.com"), "member"))
        .collect();

    let mut app = App::new(Config::default());
    app.start_load(Arc::new(StaticSource(members)));

    let loaded = wait_for_load(&mut app.pending_load).await;
    assert!(loaded.is_some());
    app.on_members_loaded(loaded.unwrap());

    assert_eq!(app.states.members().len(), 15);
    assert_eq!(app.states.total_pages(), 2);
    assert_eq!(app.table_state.selected(), Some(0));
}

#[tokio::test]
async fn test_failed_load_leaves_table_empty() {
    use crate::backend::members::{Member, MemberSource};
    use crate::config::Config;
    use crate::{App, wait_for_load};
    use std::sync::Arc;

    struct BrokenSource;

    #[async_trait::async_trait]
    impl MemberSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        async fn fetch(&self) -> anyhow::Result<Vec<Member>> {
            anyhow::bail!("connection refused")
        }
    }

    let mut app = App::new(Config::default());
    app.start_load(Arc::new(BrokenSource));

    let loaded = wait_for_load(&mut app.pending_load).await;
    assert!(loaded.is_none());
    assert!(app.states.visible().is_empty());
    assert_eq!(app.states.total_pages(), 1);
    assert_eq!(app.table_state.selected(), None);
}
