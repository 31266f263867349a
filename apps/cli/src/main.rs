mod runtime;

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use hypr_http::ReqwestHttpClient;
use hypr_profile_api::ProfileClient;
use hypr_profile_assistant::{
    AssistantConfig, Author, Conversation, ConversationHandle, DialogState, DialogStateMachine,
    FieldRegistry, InMemoryProfileStore, ProfileStore, UpdateDispatcher, UserProfile, UserSession,
    Utterance,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::prelude::*;

use crate::runtime::LogRuntime;

#[derive(Parser)]
#[command(name = "profile-assistant", about = "Edit your profile by chatting")]
struct Cli {
    /// Base URL of the profile service.
    #[arg(long, env = "PROFILE_API_BASE", default_value = "http://localhost:3000")]
    api_base: String,

    #[arg(long, env = "PROFILE_API_TOKEN", default_value = "")]
    api_token: String,

    /// Signed-in user. Without it every update is refused.
    #[arg(long, env = "PROFILE_USER_ID")]
    user_id: Option<String>,

    /// Keep updates in memory instead of calling the profile service.
    #[arg(long, env = "PROFILE_OFFLINE")]
    offline: bool,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AssistantConfig::from_env()?;

    let store: Arc<dyn ProfileStore> = if cli.offline {
        tracing::info!("using_in_memory_store");
        Arc::new(InMemoryProfileStore::new())
    } else {
        let http = ReqwestHttpClient::new(&cli.api_base)?.with_token(cli.api_token);
        Arc::new(ProfileClient::new(http))
    };

    let session = Arc::new(match cli.user_id {
        Some(id) => UserSession::signed_in(UserProfile::new(id)),
        None => UserSession::new(),
    });

    let conversation = Conversation::new(
        DialogStateMachine::default(),
        UpdateDispatcher::new(store, session),
        &config,
    )
    .with_runtime(Arc::new(LogRuntime));

    for message in conversation.transcript().messages() {
        println!("{}", message.text);
    }

    let handle = ConversationHandle::spawn(conversation).await?;

    let registry = FieldRegistry::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(&registry, handle.state().await?)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        for message in handle.submit(Utterance::typed(line)).await? {
            if message.author == Author::Assistant {
                println!("{}", message.text);
            }
        }
    }

    handle.stop();
    Ok(())
}

/// `> ` while idle, `first name> ` while a value is expected.
fn print_prompt(registry: &FieldRegistry, state: DialogState) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    match state.pending_field().and_then(|field| registry.lookup(field)) {
        Some(spec) => write!(stdout, "{}> ", spec.label)?,
        None => write!(stdout, "> ")?,
    }
    stdout.flush()
}
