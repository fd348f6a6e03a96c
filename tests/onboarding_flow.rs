//! Integration tests for the full onboarding-to-planning flow.
//!
//! These wire the handlers against the mock completion provider and a real
//! in-memory store: questionnaire answers become a profile, the profile
//! becomes the active one, and subsequent invocations resolve against it.

use std::sync::Arc;

use productivity_coach::adapters::{MockCompletionProvider, SqliteCoachStore};
use productivity_coach::application::handlers::onboarding::GenerateProfileHandler;
use productivity_coach::application::handlers::planning::{
    GenerateDailyPlanCommand, GenerateDailyPlanHandler, GenerateWeeklyReviewCommand,
    GenerateWeeklyReviewHandler,
};
use productivity_coach::domain::coaching::{resolve, Language};
use productivity_coach::domain::onboarding::OnboardingAnswers;
use productivity_coach::ports::{CoachStore, CompletionError};

const PROFILE_RESPONSE: &str = r#"{
    "system_message_daily_planning": "You coach a parent balancing work and young children.",
    "system_message_weekly_review": "You review the week of a busy parent with warmth.",
    "coaching_tone": "warm, practical",
    "key_focus_areas": ["Quran memorization/study", "Career development", "Family time"],
    "time_block_size": 15,
    "islamic_emphasis": "high"
}"#;

fn answers() -> OnboardingAnswers {
    OnboardingAnswers {
        language: Some("Deutsch".to_string()),
        role: Some("Parent with young children".to_string()),
        goals: vec![
            "Quran memorization/study".to_string(),
            "Career development".to_string(),
        ],
        available_time: Some("1-2 hours".to_string()),
        challenges: Some("Finding time with kids".to_string()),
        islamic_practice: Some("Practicing - working on consistency".to_string()),
        motivation_style: Some("Spiritual reminders (Quran, Hadith)".to_string()),
    }
}

#[tokio::test]
async fn onboarding_produces_an_active_personalized_profile() {
    let answers = answers();
    assert!(answers.is_valid_submission());

    let provider = Arc::new(MockCompletionProvider::new().with_response(PROFILE_RESPONSE));
    let store = Arc::new(SqliteCoachStore::connect_in_memory().await.unwrap());

    let generator = GenerateProfileHandler::new(provider);
    let profile = generator.generate(&answers).await;

    // The profile passes the persistence gate and lands as active.
    assert!(profile.validate());
    assert!(!profile.is_default);
    store.save_profile(&profile).await.unwrap();

    let active = store.active_profile().await.unwrap().unwrap();
    assert_eq!(active.profile.language, Language::De);
    assert_eq!(active.profile.time_block_size, 15);
    assert_eq!(active.profile.onboarding_data, answers);

    // Later invocations resolve against the stored personalization.
    let config = resolve("daily_planning", Some(&active.profile));
    assert!(config
        .system_instruction
        .starts_with("You coach a parent balancing work and young children."));
    assert!(config.system_instruction.ends_with("Antworte auf Deutsch."));
    assert_eq!(config.model, "llama-3.3-70b-versatile");
}

#[tokio::test]
async fn failed_generation_still_completes_onboarding() {
    let provider = Arc::new(
        MockCompletionProvider::new().with_error(CompletionError::unavailable("api down")),
    );
    let store = Arc::new(SqliteCoachStore::connect_in_memory().await.unwrap());

    let generator = GenerateProfileHandler::new(provider);
    let profile = generator.generate(&answers()).await;

    assert!(profile.is_default);
    assert!(profile.validate());
    assert_eq!(profile.language, Language::De);
    assert_eq!(
        profile.key_focus_areas,
        vec!["Quran memorization/study", "Career development"]
    );

    store.save_profile(&profile).await.unwrap();
    let active = store.active_profile().await.unwrap().unwrap();
    assert!(active.profile.is_default);
}

#[tokio::test]
async fn plans_and_reviews_accumulate_under_the_active_profile() {
    let provider = Arc::new(
        MockCompletionProvider::new()
            .with_response(PROFILE_RESPONSE)
            .with_response("Mon: Quran after Fajr, then two work blocks.")
            .with_response("Tue: family morning, deep work afternoon.")
            .with_response("A strong week; keep the Fajr routine."),
    );
    let store = Arc::new(SqliteCoachStore::connect_in_memory().await.unwrap());

    let profile = GenerateProfileHandler::new(provider.clone())
        .generate(&answers())
        .await;
    store.save_profile(&profile).await.unwrap();
    let record = store.active_profile().await.unwrap().unwrap();

    let planner = GenerateDailyPlanHandler::new(provider.clone(), store.clone());
    for day in ["2025-03-10", "2025-03-11"] {
        planner
            .handle(
                &record,
                GenerateDailyPlanCommand {
                    date: day.parse().unwrap(),
                    available_hours: 2.0,
                    additional_context: None,
                },
            )
            .await
            .unwrap();
    }

    let reviewer = GenerateWeeklyReviewHandler::new(provider.clone(), store.clone());
    let review = reviewer
        .handle(
            &record,
            GenerateWeeklyReviewCommand::for_week_of("2025-03-12".parse().unwrap())
                .with_reflections("Evenings were chaotic"),
        )
        .await
        .unwrap();

    assert_eq!(review.content, "A strong week; keep the Fajr routine.");
    assert_eq!(review.week_start, "2025-03-10".parse::<chrono::NaiveDate>().unwrap());

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_profiles, 1);
    assert_eq!(stats.total_daily_plans, 2);
    assert_eq!(stats.total_weekly_reviews, 1);

    // The review prompt quoted the stored plans.
    let calls = provider.calls();
    let review_prompt = &calls.last().unwrap().messages.last().unwrap().content;
    assert!(review_prompt.contains("**2025-03-10**"));
    assert!(review_prompt.contains("Evenings were chaotic"));
}

#[tokio::test]
async fn re_onboarding_replaces_the_active_profile() {
    let provider = Arc::new(
        MockCompletionProvider::new()
            .with_response(PROFILE_RESPONSE)
            .with_error(CompletionError::network("flaky connection")),
    );
    let store = Arc::new(SqliteCoachStore::connect_in_memory().await.unwrap());
    let generator = GenerateProfileHandler::new(provider);

    let first = generator.generate(&answers()).await;
    store.save_profile(&first).await.unwrap();

    let mut second_answers = answers();
    second_answers.language = Some("English".to_string());
    let second = generator.generate(&second_answers).await;
    store.save_profile(&second).await.unwrap();

    let active = store.active_profile().await.unwrap().unwrap();
    assert!(active.profile.is_default);
    assert_eq!(active.profile.language, Language::En);

    let all = store.all_profiles().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.iter().filter(|r| r.is_active).count(), 1);
}
