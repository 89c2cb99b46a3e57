use server::{AttachmentStore, Disabled, HttpObjectStore, ServerState};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tally={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let state = match &settings.attachments {
        Some(attachments) => {
            tracing::info!("Uploading attachments to {}", attachments.base_url);
            state_with(HttpObjectStore::new(
                &attachments.base_url,
                attachments.public_url.as_deref(),
            ))
        }
        None => {
            tracing::info!("No attachments settings, uploads are disabled");
            state_with(Disabled)
        }
    };

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    if let Err(err) = server::run_with_listener(state, listener).await {
        tracing::error!("server failed: {err}");
        return Err(err.into());
    }

    Ok(())
}

fn state_with(attachments: impl AttachmentStore + 'static) -> ServerState {
    ServerState::new(engine::Engine::new(), attachments)
}
