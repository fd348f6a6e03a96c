//! Integration tests for the SQLite store.
//!
//! These exercise the CoachStore contract end to end on real databases:
//! the single-active-profile invariant, append-only artifact history with
//! newest-wins reads, aggregate stats, and reset.

use productivity_coach::adapters::SqliteCoachStore;
use productivity_coach::application::handlers::onboarding::default_profile;
use productivity_coach::domain::onboarding::OnboardingAnswers;
use productivity_coach::ports::CoachStore;

use chrono::NaiveDate;

fn answers(goal: &str) -> OnboardingAnswers {
    OnboardingAnswers {
        language: Some("English".to_string()),
        role: Some("Student".to_string()),
        goals: vec![goal.to_string()],
        ..Default::default()
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

async fn store() -> SqliteCoachStore {
    SqliteCoachStore::connect_in_memory().await.unwrap()
}

#[tokio::test]
async fn first_run_has_no_active_profile() {
    let store = store().await;
    assert!(store.active_profile().await.unwrap().is_none());
}

#[tokio::test]
async fn save_profile_twice_leaves_exactly_one_active() {
    let store = store().await;

    let first = store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();
    let second = store
        .save_profile(&default_profile(&answers("Family time")))
        .await
        .unwrap();
    assert_ne!(first, second);

    let active = store.active_profile().await.unwrap().unwrap();
    assert_eq!(active.id, second);
    assert!(active.is_active);
    assert_eq!(active.profile.key_focus_areas, vec!["Family time"]);

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_profiles, 2);
    assert_eq!(stats.active_profiles, 1);
}

#[tokio::test]
async fn deactivated_profiles_stay_as_history() {
    let store = store().await;
    store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();
    store
        .save_profile(&default_profile(&answers("Family time")))
        .await
        .unwrap();

    let all = store.all_profiles().await.unwrap();
    assert_eq!(all.len(), 2);
    // Newest first; older one deactivated but intact.
    assert!(all[0].is_active);
    assert!(!all[1].is_active);
    assert_eq!(all[1].profile.key_focus_areas, vec!["Career development"]);
}

#[tokio::test]
async fn update_profile_rewrites_payload_in_place() {
    let store = store().await;
    let id = store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();

    let mut updated = store.active_profile().await.unwrap().unwrap().profile;
    updated.coaching_tone = "direct, focused".to_string();
    assert!(store.update_profile(id, &updated).await.unwrap());

    let reloaded = store.active_profile().await.unwrap().unwrap();
    assert_eq!(reloaded.id, id);
    assert!(reloaded.is_active);
    assert_eq!(reloaded.profile.coaching_tone, "direct, focused");
}

#[tokio::test]
async fn update_profile_returns_false_for_unknown_id() {
    let store = store().await;
    let profile = default_profile(&answers("Career development"));
    let updated = store
        .update_profile(productivity_coach::domain::foundation::ProfileId::from_i64(999), &profile)
        .await
        .unwrap();
    assert!(!updated);
}

#[tokio::test]
async fn plan_for_returns_most_recent_generation() {
    let store = store().await;
    let owner = store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();

    let day = date("2025-03-10");
    store
        .save_daily_plan(owner, day, "first attempt", 2.0)
        .await
        .unwrap();
    let second = store
        .save_daily_plan(owner, day, "second attempt", 3.5)
        .await
        .unwrap();

    let current = store.plan_for(owner, day).await.unwrap().unwrap();
    assert_eq!(current.id, second);
    assert_eq!(current.content, "second attempt");
    assert_eq!(current.available_hours, 3.5);

    // Both generations remain as history.
    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_daily_plans, 2);
}

#[tokio::test]
async fn plan_for_missing_date_is_none() {
    let store = store().await;
    let owner = store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();
    assert!(store
        .plan_for(owner, date("2025-01-01"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn recent_plans_order_by_date_not_creation() {
    let store = store().await;
    let owner = store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();

    // Inserted out of calendar order on purpose.
    for (day, text) in [
        ("2025-03-12", "wednesday"),
        ("2025-03-10", "monday"),
        ("2025-03-14", "friday"),
        ("2025-03-11", "tuesday"),
    ] {
        store
            .save_daily_plan(owner, date(day), text, 1.0)
            .await
            .unwrap();
    }

    let recent = store.recent_plans(owner, 3).await.unwrap();
    let dates: Vec<String> = recent.iter().map(|p| p.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-03-14", "2025-03-12", "2025-03-11"]);
}

#[tokio::test]
async fn plans_are_scoped_to_their_owner() {
    let store = store().await;
    let first = store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();
    let second = store
        .save_profile(&default_profile(&answers("Family time")))
        .await
        .unwrap();

    store
        .save_daily_plan(first, date("2025-03-10"), "for the first profile", 1.0)
        .await
        .unwrap();

    assert!(store
        .plan_for(second, date("2025-03-10"))
        .await
        .unwrap()
        .is_none());
    assert!(store.recent_plans(second, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn weekly_reviews_supersede_per_week() {
    let store = store().await;
    let owner = store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();

    let start = date("2025-03-10");
    let end = date("2025-03-16");
    store
        .save_weekly_review(owner, start, end, "first review")
        .await
        .unwrap();
    let second = store
        .save_weekly_review(owner, start, end, "second review")
        .await
        .unwrap();

    let current = store.review_for(owner, start).await.unwrap().unwrap();
    assert_eq!(current.id, second);
    assert_eq!(current.content, "second review");
    assert_eq!(current.week_end, end);
}

#[tokio::test]
async fn all_reviews_are_newest_week_first() {
    let store = store().await;
    let owner = store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();

    store
        .save_weekly_review(owner, date("2025-03-03"), date("2025-03-09"), "older")
        .await
        .unwrap();
    store
        .save_weekly_review(owner, date("2025-03-10"), date("2025-03-16"), "newer")
        .await
        .unwrap();

    let reviews = store.all_reviews(owner).await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].content, "newer");
    assert_eq!(reviews[1].content, "older");
}

#[tokio::test]
async fn reset_destroys_all_state() {
    let store = store().await;
    let owner = store
        .save_profile(&default_profile(&answers("Career development")))
        .await
        .unwrap();
    store
        .save_daily_plan(owner, date("2025-03-10"), "a plan", 2.0)
        .await
        .unwrap();

    store.reset().await.unwrap();

    assert!(store.active_profile().await.unwrap().is_none());
    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_profiles, 0);
    assert_eq!(stats.total_daily_plans, 0);
    assert_eq!(stats.total_weekly_reviews, 0);

    // Store is usable again after reset.
    store
        .save_profile(&default_profile(&answers("Family time")))
        .await
        .unwrap();
    assert!(store.active_profile().await.unwrap().is_some());
}

#[tokio::test]
async fn schema_version_is_recorded() {
    let store = store().await;
    assert_eq!(store.metadata("db_version").await.unwrap().as_deref(), Some("1"));
    assert!(store.metadata("missing_key").await.unwrap().is_none());
}

#[tokio::test]
async fn file_backed_store_persists_across_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coach.db");
    let path = path.to_str().unwrap();

    {
        let store = SqliteCoachStore::connect(path).await.unwrap();
        store
            .save_profile(&default_profile(&answers("Quran memorization/study")))
            .await
            .unwrap();
    }

    let reopened = SqliteCoachStore::connect(path).await.unwrap();
    let active = reopened.active_profile().await.unwrap().unwrap();
    assert_eq!(active.profile.key_focus_areas, vec!["Quran memorization/study"]);

    let stats = reopened.stats().await.unwrap();
    assert_eq!(stats.total_profiles, 1);
    assert!(stats.size_bytes > 0);
}
