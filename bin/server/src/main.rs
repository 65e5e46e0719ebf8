#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use analytics_dashboard_core::CLIENT_ID_ENV_VAR;
    use analytics_dashboard_server::{
        app::App,
        config::ServerConfig,
        proxy::{self, BackendProxy},
    };
    use axum::{
        Router,
        routing::any,
    };
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use std::sync::Arc;
    use tower_http::{services::ServeDir, trace::TraceLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(
        backend = %config.backend.url,
        login_endpoint = %config.sign_in.login_endpoint,
        "Loaded configuration"
    );
    if config.sign_in.client_id().is_none() {
        tracing::warn!(
            "{CLIENT_ID_ENV_VAR} is not set; the sign-in page will show a configuration error"
        );
    }

    let backend = BackendProxy::new(&config.backend).expect("failed to build backend client");
    let sign_in_settings = Arc::new(config.sign_in);

    let conf = get_configuration(None).expect("failed to get leptos configuration");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let state = AppState {
        leptos_options: leptos_options.clone(),
        backend: Arc::new(backend),
    };

    let app = Router::new()
        // Backend API, including the credential exchange
        .route("/api/{*path}", any(proxy::forward))
        .leptos_routes(&state, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
        .nest_service("/pkg", ServeDir::new("target/site/pkg"))
        // Public sign-in settings for the settings server function
        .layer(axum::Extension(sign_in_settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}

/// Shared router state.
#[cfg(feature = "ssr")]
#[derive(Clone)]
struct AppState {
    leptos_options: leptos::prelude::LeptosOptions,
    backend: std::sync::Arc<analytics_dashboard_server::proxy::BackendProxy>,
}

#[cfg(feature = "ssr")]
impl axum::extract::FromRef<AppState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

#[cfg(feature = "ssr")]
impl axum::extract::FromRef<AppState>
    for std::sync::Arc<analytics_dashboard_server::proxy::BackendProxy>
{
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}

#[cfg(feature = "ssr")]
fn shell(options: leptos::prelude::LeptosOptions) -> impl leptos::prelude::IntoView {
    use analytics_dashboard_core::IDENTITY_SCRIPT_URL;
    use analytics_dashboard_server::app::App;
    use leptos::prelude::*;
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href="/pkg/analytics-dashboard.css"/>
                <script src=IDENTITY_SCRIPT_URL defer></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This main function is only used for WASM builds
    // The actual hydration happens in lib.rs
}
