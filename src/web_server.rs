use anyhow::{Context, Result};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    serve, Form, Router,
};
use minijinja::{context, path_loader, Environment};
use minijinja_autoreload::AutoReloader;
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::itinerary::Generator;
use crate::languages::{pack, Language};
use crate::session::{Action, Phase, SessionState};

// One in-memory session per process instance, plus the message for the
// inline error banner when the last generation substituted the placeholder.
struct WebSession {
    state: SessionState,
    last_error: Option<String>,
}

// Shared application state
#[derive(Clone)]
struct AppState {
    templates: Arc<AutoReloader>,
    session: Arc<Mutex<WebSession>>,
    generator: Arc<Generator>,
}

// Minijinja Environment setup
fn create_minijinja_env() -> Result<AutoReloader> {
    // Use AutoReloader for development convenience
    let reloader = AutoReloader::new(|notifier| {
        // Create the loader *inside* the closure
        let loader = path_loader("templates");
        let mut env = Environment::new();
        env.set_loader(loader);
        // Watch the templates directory for changes
        notifier.watch_path("templates", true);
        Ok(env)
    });
    Ok(reloader)
}

/// Run the generation call if and only if the session has reached the end of
/// the questions with no itinerary stored yet. Guarded by the stored
/// itinerary, so re-rendering a finished session never calls out again.
async fn ensure_itinerary(session: &mut WebSession, generator: &Generator) {
    if !session.state.needs_generation() {
        return;
    }
    // needs_generation implies a selected language
    let Some(language) = session.state.selected_language else {
        return;
    };
    let generation = generator.generate(&session.state.answers, language).await;
    session.last_error = generation.error;
    session.state.store_itinerary(generation.text);
}

async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, Html<String>> {
    let mut session = state.session.lock().await;
    // The AwaitingItinerary -> Done transition is automatic: taking it on
    // render keeps a session that escaped here from ever sticking.
    ensure_itinerary(&mut session, &state.generator).await;

    let languages: Vec<_> = Language::ALL
        .iter()
        .map(|l| context! { name => l.name(), flag => l.flag() })
        .collect();

    let view = match session.state.phase() {
        Phase::LanguageUnselected => context! {
            phase => "pick_language",
            languages => languages,
        },
        Phase::Asking { index, question } => {
            let language = session.state.selected_language.unwrap_or(Language::English);
            let labels = pack(language).labels;
            let count = session.state.question_count();
            let next_label = if index < count - 1 {
                labels.next_question
            } else {
                labels.generate_itinerary
            };
            context! {
                phase => "asking",
                language => language.name(),
                question => question,
                question_index => index,
                question_count => count,
                current_answer => session.state.answers.get(question).cloned().unwrap_or_default(),
                next_label => next_label,
                escape_label => labels.escape_generate,
            }
        }
        Phase::AwaitingItinerary => {
            let language = session.state.selected_language.unwrap_or(Language::English);
            context! {
                phase => "generating",
                language => language.name(),
                status => pack(language).labels.generating,
            }
        }
        Phase::Done => {
            let language = session.state.selected_language.unwrap_or(Language::English);
            context! {
                phase => "done",
                language => language.name(),
                heading => pack(language).labels.suggested_itinerary,
                itinerary => session.state.itinerary.clone().unwrap_or_default(),
                error => session.last_error.clone(),
            }
        }
    };

    state
        .templates
        .acquire_env()
        .and_then(|env| {
            env.get_template("index.html")
                .and_then(|tmpl| tmpl.render(view))
        })
        .map(Html)
        .map_err(|e| {
            warn!("Failed to get or render template: {}", e);
            Html(format!("Internal Server Error: {}", e))
        })
}

#[derive(Deserialize)]
struct LanguageForm {
    language: Language,
}

async fn language_handler(
    State(state): State<AppState>,
    Form(form): Form<LanguageForm>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    session.state.apply(Action::PickLanguage(form.language));
    Redirect::to("/")
}

#[derive(Deserialize)]
struct TurnForm {
    #[serde(default)]
    answer: String,
    action: String,
}

async fn turn_handler(
    State(state): State<AppState>,
    Form(form): Form<TurnForm>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    session.state.apply(Action::EditAnswer(form.answer));
    match form.action.as_str() {
        "next" => session.state.apply(Action::Next),
        "escape" => session.state.apply(Action::Escape),
        other => warn!("Ignoring unknown turn action: {}", other),
    }
    // The one blocking call of the session happens inside this turn; the
    // redirect renders the finished state.
    ensure_itinerary(&mut session, &state.generator).await;
    Redirect::to("/")
}

/// Build the application router. Separated from the listener so route tests
/// can drive it directly.
pub fn app(generator: Generator) -> Result<Router> {
    let templates = create_minijinja_env().context("Failed to initialize template engine")?;

    let state = AppState {
        templates: Arc::new(templates),
        session: Arc::new(Mutex::new(WebSession {
            state: SessionState::new(),
            last_error: None,
        })),
        generator: Arc::new(generator),
    };

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/language", post(language_handler))
        .route("/turn", post(turn_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}

pub async fn start_web_server(port: u16, generator: Generator) -> Result<()> {
    let app = app(generator)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Web server listening on http://{}", addr);

    // Bind using tokio::net::TcpListener
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;

    // Use axum::serve to run the application
    serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
