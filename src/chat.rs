// Terminal front-end: the same questionnaire walk as the web UI, driven
// over stdin/stdout.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::itinerary::Generator;
use crate::languages::{pack, Language};
use crate::session::{Action, SessionState};

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn pick_language() -> Result<Language> {
    println!("Please select your preferred language:");
    for (i, language) in Language::ALL.iter().enumerate() {
        println!("  {}. {} {}", i + 1, language.name(), language.flag());
    }
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let input = read_line()?;
        let choice = input
            .parse::<usize>()
            .ok()
            .and_then(|n| Language::ALL.get(n.checked_sub(1)?).copied())
            .or_else(|| Language::from_name(&input));
        match choice {
            Some(language) => return Ok(language),
            None => println!("Enter a number between 1 and {}.", Language::ALL.len()),
        }
    }
}

/// Run one interactive questionnaire session in the terminal. An empty line
/// leaves a question unanswered, the literal "skip" records it as skipped,
/// and "!escape" jumps straight to generation.
pub async fn run_questionnaire(generator: &Generator) -> Result<()> {
    let mut session = SessionState::new();

    let language = pick_language()?;
    session.apply(Action::PickLanguage(language));
    info!("Language selected: {}", language);
    println!("Language selected: {}", language);
    println!("(Press Enter to leave a question unanswered, type 'skip' to skip it, or '!escape' to generate right away.)");

    while let Some(question) = session.current_question() {
        println!();
        println!("{}", question);
        print!("> ");
        io::stdout().flush().ok();
        let input = read_line()?;
        if input == "!escape" {
            session.apply(Action::Escape);
            break;
        }
        session.apply(Action::EditAnswer(input));
        session.apply(Action::Next);
    }

    let labels = pack(language).labels;
    println!();
    println!("{}", labels.generating);

    if session.needs_generation() {
        let generation = generator.generate(&session.answers, language).await;
        if let Some(error) = &generation.error {
            eprintln!("{}", error);
        }
        session.store_itinerary(generation.text);
    }

    println!();
    println!("{}", labels.suggested_itinerary);
    if let Some(itinerary) = &session.itinerary {
        println!("{}", itinerary);
    }

    Ok(())
}
