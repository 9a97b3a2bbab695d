use tour_planner::itinerary::build_prompt;
use tour_planner::languages::{default_prompt, Language};
use tour_planner::session::AnswerMap;

fn answers(entries: &[(&str, &str)]) -> AnswerMap {
    entries
        .iter()
        .map(|(q, a)| (q.to_string(), a.to_string()))
        .collect()
}

#[test]
fn skipped_and_empty_answers_fall_back_to_the_canned_prompt() {
    let answers = answers(&[("Q1", "skip"), ("Q2", "")]);
    for language in Language::ALL {
        assert_eq!(build_prompt(&answers, language), default_prompt(language));
    }
}

#[test]
fn absent_answers_fall_back_to_the_canned_prompt() {
    let answers = AnswerMap::new();
    assert_eq!(
        build_prompt(&answers, Language::Russian),
        default_prompt(Language::Russian)
    );
}

#[test]
fn skip_sentinel_is_case_insensitive() {
    let answers = answers(&[("Q1", "Skip"), ("Q2", "SKIP")]);
    assert_eq!(
        build_prompt(&answers, Language::English),
        default_prompt(Language::English)
    );
}

#[test]
fn surviving_answers_appear_as_lines_and_skipped_ones_do_not() {
    let answers = answers(&[("Q1", "Luxor"), ("Q2", "skip")]);
    let prompt = build_prompt(&answers, Language::English);

    assert!(prompt.contains("- Q1: Luxor"));
    assert!(!prompt.contains("Q2"));
}

#[test]
fn prompt_names_the_language_and_requests_a_day_by_day_plan() {
    let answers = answers(&[("Q1", "Luxor")]);
    let prompt = build_prompt(&answers, Language::German);

    assert!(prompt.starts_with(
        "Generate a day-by-day itinerary for a trip to Egypt in German based on the following preferences:"
    ));
    assert!(prompt.ends_with("Please format the output as a clear day-by-day plan."));
}

#[test]
fn canned_prompts_differ_per_language() {
    let english = default_prompt(Language::English);
    for language in [Language::Arabic, Language::Russian, Language::German] {
        assert_ne!(default_prompt(language), english);
    }
}
