//! UDAY console shell.
//!
//! Wires the library end to end: configuration, login or registration, then
//! a chat loop. `/screening` starts the check-in and `/quit` leaves.

use std::error::Error;
use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use uday::adapters::ai::{GeminiConfig, GeminiProvider, MockCompletionClient, ResilientCompletionClient};
use uday::adapters::storage::{FileConversationStore, FileUserRegistry};
use uday::application::{
    ConversationOrchestrator, LoginUserHandler, LoginUserQuery, OpenSessionCommand,
    OpenSessionHandler, RegisterUserCommand, RegisterUserHandler, Reply, ResponseRoute,
};
use uday::config::{AiConfig, AiProvider, AppConfig};
use uday::domain::conversation::{ChatSession, TurnRole};
use uday::domain::foundation::UserEmail;
use uday::domain::screening::{ANSWER_OPTIONS, QUESTION_COUNT};
use uday::domain::user::{FocusArea, Profession, UserProfile};
use uday::ports::{CompletionClient, UserRegistry};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.runtime.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    config.validate()?;

    let registry: Arc<dyn UserRegistry> =
        Arc::new(FileUserRegistry::new(config.storage.users_path()));
    let store = Arc::new(FileConversationStore::new(&config.storage.data_dir));
    let client = completion_client(&config.ai)?;

    tracing::info!(
        provider = %client.provider_info().name,
        model = %client.provider_info().model,
        data_dir = %config.storage.data_dir.display(),
        "UDAY starting"
    );

    let orchestrator = ConversationOrchestrator::new(client, store.clone())
        .with_sentiment_gate(config.features.enable_sentiment_gate)
        .with_generation(config.ai.max_output_tokens, config.ai.temperature);
    let sessions = OpenSessionHandler::new(store)
        .with_screening_restart(config.features.allow_screening_restart);

    let mut input = BufReader::new(stdin()).lines();

    println!("💚 Welcome to UDAY — Your Mental Wellness Companion 💚\n");

    let Some((email, profile)) = sign_in(&mut input, registry).await? else {
        return Ok(());
    };

    let mut session = sessions.handle(OpenSessionCommand { email, profile }).await;
    if let Some(welcome) = session.display_log().last() {
        println!("[{}] UDAY: {}", welcome.time_label(), welcome.content);
    }
    println!("(Type /screening for a short check-in, /quit to leave.)");

    chat_loop(&mut input, &orchestrator, &mut session).await?;

    println!("Take care. 💚");
    Ok(())
}

fn completion_client(ai: &AiConfig) -> Result<Arc<dyn CompletionClient>, Box<dyn Error>> {
    let client: Arc<dyn CompletionClient> = match ai.provider {
        AiProvider::Gemini => {
            let key = ai.gemini_api_key.clone().unwrap_or_default();
            let provider = GeminiProvider::new(
                GeminiConfig::new(key)
                    .with_model(&ai.model)
                    .with_base_url(&ai.base_url)
                    .with_timeout(ai.timeout()),
            )?;
            Arc::new(
                ResilientCompletionClient::new(provider)
                    .with_timeout(ai.timeout())
                    .with_max_retries(ai.max_retries),
            )
        }
        AiProvider::Mock => Arc::new(
            ResilientCompletionClient::new(MockCompletionClient::new())
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries),
        ),
    };
    Ok(client)
}

async fn prompt(input: &mut Input, label: &str) -> std::io::Result<Option<String>> {
    print!("{}", label);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

/// Accepts a 1-based menu number or the option's label.
fn pick<T: Copy + Display + FromStr>(options: &[T], answer: &str) -> Option<T> {
    match answer.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => Some(options[n - 1]),
        Ok(_) => None,
        Err(_) => answer.parse().ok(),
    }
}

async fn choose<T: Copy + Display + FromStr>(
    input: &mut Input,
    title: &str,
    options: &[T],
) -> std::io::Result<Option<T>> {
    println!("{}", title);
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    loop {
        let Some(answer) = prompt(input, "> ").await? else {
            return Ok(None);
        };
        match pick(options, &answer) {
            Some(choice) => return Ok(Some(choice)),
            None => println!("Please pick one of the numbers above."),
        }
    }
}

/// Logs an existing user in or registers a new one. `None` on end of input.
async fn sign_in(
    input: &mut Input,
    registry: Arc<dyn UserRegistry>,
) -> Result<Option<(UserEmail, UserProfile)>, Box<dyn Error>> {
    let login = LoginUserHandler::new(registry.clone());
    let register = RegisterUserHandler::new(registry);

    loop {
        let Some(answer) = prompt(input, "Have you used UDAY before? (yes/no) ").await? else {
            return Ok(None);
        };

        if answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y") {
            println!("\n🔐 Login");
            let Some(email) = prompt(input, "Email: ").await? else {
                return Ok(None);
            };
            match login.handle(LoginUserQuery { email }).await {
                Ok(found) => return Ok(Some((found.email, found.profile))),
                Err(_) => println!("User not found!\n"),
            }
        } else if answer.eq_ignore_ascii_case("no") || answer.eq_ignore_ascii_case("n") {
            println!("\n🧾 Create Account");
            let Some(email) = prompt(input, "Email ID: ").await? else {
                return Ok(None);
            };
            let Some(name) = prompt(input, "Name: ").await? else {
                return Ok(None);
            };
            let Some(age) = prompt(input, "Age: ").await? else {
                return Ok(None);
            };
            let Some(profession) = choose(input, "Profession:", &Profession::ALL).await? else {
                return Ok(None);
            };
            let Some(focus) = choose(input, "Focus Area:", &FocusArea::ALL).await? else {
                return Ok(None);
            };

            let cmd = RegisterUserCommand {
                email,
                name,
                age,
                profession,
                focus,
            };
            match register.handle(cmd).await {
                Ok(registered) => return Ok(Some((registered.email, registered.profile))),
                Err(err) => println!("Could not register: {}\n", err),
            }
        }
    }
}

async fn chat_loop(
    input: &mut Input,
    orchestrator: &ConversationOrchestrator,
    session: &mut ChatSession,
) -> std::io::Result<()> {
    loop {
        let Some(line) = prompt(input, "You: ").await? else {
            return Ok(());
        };

        let result = match line.as_str() {
            "/quit" => return Ok(()),
            "/screening" => orchestrator.start_screening(session),
            _ => orchestrator.respond(session, &line).await,
        };

        match result {
            Ok(reply) => show_reply(session, &reply),
            Err(err) => {
                tracing::debug!(error = %err, "Message not answered");
                println!("UDAY: {}", err.user_message());
            }
        }
    }
}

fn show_reply(session: &ChatSession, reply: &Reply) {
    let time = session
        .display_log()
        .iter()
        .rev()
        .find(|m| m.role == TurnRole::Assistant)
        .map(|m| m.time_label())
        .unwrap_or_default();

    match reply.route {
        ResponseRoute::ScreeningStarted => {
            println!("[{}] UDAY: {}", time, reply.text);
            show_screening_question(session);
        }
        ResponseRoute::ScreeningAnswer { completed: false } => show_screening_question(session),
        _ => println!("[{}] UDAY: {}", time, reply.text),
    }
}

fn show_screening_question(session: &ChatSession) {
    let screening = session.screening();
    if let (Some(number), Some(question)) = (screening.question_number(), screening.current_question()) {
        println!("\nQuestion {} of {}", number, QUESTION_COUNT);
        println!("{}", question);
        for option in ANSWER_OPTIONS.iter() {
            println!("  {}", option.display());
        }
    }
}
