// Per-session questionnaire state: a linear index walk over the selected
// language's question table. The transition logic lives here and stays free
// of I/O; the web handler and the terminal chat both drive it through
// `apply` and perform the one blocking generation call themselves when
// `needs_generation` turns true.

use std::collections::BTreeMap;

use crate::languages::{pack, Language};

/// Answers keyed by the literal question text of the active language.
/// At most one entry per question string; a question the user never typed
/// anything for is simply absent.
pub type AnswerMap = BTreeMap<String, String>;

/// One user action, exactly one per turn.
#[derive(Debug, Clone)]
pub enum Action {
    /// One-shot language pick; ignored once a language is set.
    PickLanguage(Language),
    /// Edit of the input bound to the current question. Empty input does
    /// not clear a previously stored answer.
    EditAnswer(String),
    /// Advance to the next question (or past the last one).
    Next,
    /// Jump straight to generation from any question.
    Escape,
}

/// Where the session currently stands, derived from the raw fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    LanguageUnselected,
    Asking { index: usize, question: &'static str },
    AwaitingItinerary,
    Done,
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub selected_language: Option<Language>,
    pub current_question_index: usize,
    pub answers: AnswerMap,
    pub itinerary: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question_count(&self) -> usize {
        match self.selected_language {
            Some(language) => pack(language).questions.len(),
            None => 0,
        }
    }

    /// The question text the input field is currently bound to.
    pub fn current_question(&self) -> Option<&'static str> {
        let language = self.selected_language?;
        pack(language)
            .questions
            .get(self.current_question_index)
            .copied()
    }

    pub fn phase(&self) -> Phase {
        if self.selected_language.is_none() {
            return Phase::LanguageUnselected;
        }
        match self.current_question() {
            Some(question) => Phase::Asking {
                index: self.current_question_index,
                question,
            },
            None => {
                if self.itinerary.is_some() {
                    Phase::Done
                } else {
                    Phase::AwaitingItinerary
                }
            }
        }
    }

    /// True exactly when the index has reached the end of the question table
    /// and no itinerary has been stored yet. The shell must then run one
    /// generation call and store the result; the flag goes false afterwards
    /// and never comes back for the same answer set.
    pub fn needs_generation(&self) -> bool {
        self.selected_language.is_some()
            && self.current_question_index >= self.question_count()
            && self.itinerary.is_none()
    }

    /// Apply one user action. Pure state transition; no side effects.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::PickLanguage(language) => {
                if self.selected_language.is_none() {
                    self.selected_language = Some(language);
                    self.current_question_index = 0;
                    self.answers.clear();
                    self.itinerary = None;
                }
            }
            Action::EditAnswer(value) => {
                // Write path is conditioned on non-empty input so a cleared
                // field never erases an answer the user already gave.
                if value.is_empty() {
                    return;
                }
                if let Some(question) = self.current_question() {
                    self.answers.insert(question.to_string(), value);
                }
            }
            Action::Next => {
                if self.selected_language.is_some()
                    && self.current_question_index < self.question_count()
                {
                    self.current_question_index += 1;
                }
            }
            Action::Escape => {
                if self.selected_language.is_some() {
                    self.current_question_index = self.question_count();
                    // Reset so the shell regenerates from the current
                    // answers. Unset on every reachable path anyway.
                    self.itinerary = None;
                }
            }
        }
    }

    /// Store the generation result. Done is terminal: once set, the
    /// itinerary is never recomputed within the session.
    pub fn store_itinerary(&mut self, text: String) {
        self.itinerary = Some(text);
    }
}
