//! Headless Client Host
//!
//! Wires the client the way the mobile shell does and logs every navigation
//! change. Only the splash screen is driven here; later screens wait for user
//! input, so this binary mostly checks launch and token handling against a
//! real backend.
//! Uses `anyhow` for startup errors, but client-level errors stay
//! `kernel::NetworkError`.

use std::env;
use std::sync::Arc;

use auth::{AuthConfig, HttpAuthApi, ReissuingClient, SessionManager};
use platform::token::FileTokenStorage;
use platform::{ApiClient, ClientConfig, TokenStore};
use scenes::view_model::SplashInput;
use scenes::{
    AppCoordinator, Coordinator, LiveSceneFactory, NavigationController, NavigationEvent, Scene,
    Tab, ViewModel,
};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Push token handed over by the platform shell
const ENV_FCM_TOKEN: &str = "LIONHEART_FCM_TOKEN";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "host=info,scenes=info,auth=info,content=info,platform=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        token_path = %config.token_path.display(),
        "Client configured"
    );

    let tokens = Arc::new(TokenStore::open(FileTokenStorage::new(
        config.token_path.clone(),
    ))?);
    match env::var(ENV_FCM_TOKEN) {
        Ok(fcm_token) => tokens.set_fcm_token(fcm_token)?,
        Err(_) if tokens.fcm_token().is_none() => {
            tracing::warn!("{ENV_FCM_TOKEN} not set; login and signup will be refused")
        }
        Err(_) => {}
    }

    // Feature requests go through the reissuing decorator; auth calls do not
    let transport = ApiClient::new(&config, tokens.clone())?;
    let sessions = Arc::new(SessionManager::new(
        Arc::new(HttpAuthApi::new(transport.clone())),
        tokens,
        Arc::new(AuthConfig::default()),
    ));
    let factory = Arc::new(LiveSceneFactory::new(
        ReissuingClient::new(transport, sessions.clone()),
        sessions,
    ));

    let window = Arc::new(NavigationController::new("window"));
    let events = window.subscribe();
    let app = AppCoordinator::new(window.clone(), factory.clone(), factory.session_control());
    app.start();
    drive_splash(&window);

    tokio::select! {
        _ = log_events(window.clone(), events) => {
            tracing::warn!("Navigation event stream closed");
        }
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutting down");
        }
    }

    app.finish();
    Ok(())
}

/// Play the splash screen's part: load the view, which checks the token
fn drive_splash(window: &NavigationController) {
    let Some(Scene::Splash(splash)) = window.top().map(|screen| screen.scene) else {
        tracing::warn!("Splash is not on screen");
        return;
    };
    let input = SplashInput::default();
    let _output = splash.transform(input.clone());
    input.view_did_load.send(());
}

async fn log_events(
    window: Arc<NavigationController>,
    mut events: broadcast::Receiver<NavigationEvent>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                tracing::info!(?event, "Navigation");
                if let NavigationEvent::RootReplaced {
                    scene: "tab_bar", ..
                } = event
                {
                    watch_tabs(&window);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Navigation events dropped");
            }
            Err(RecvError::Closed) => return,
        }
    }
}

/// Log each tab's own stack once the tab bar is installed
fn watch_tabs(window: &NavigationController) {
    let Some(Scene::TabBar(tab_bar)) = window.top().map(|screen| screen.scene) else {
        return;
    };
    for tab in Tab::ALL {
        let navigation = tab_bar.navigation(tab).clone();
        tracing::info!(
            tab = tab.label(),
            scene = navigation.top().map(|screen| screen.name()),
            "Tab ready"
        );
        let mut events = navigation.subscribe();
        tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                tracing::info!(tab = tab.label(), ?event, "Tab navigation");
            }
        });
    }
}
