use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ticket_api::routes::create_router;
use ticket_api::shared::config::Config;
use ticket_api::shared::database::Database;
use ticket_api::shared::services::AppState;

// Import models for OpenAPI schema
use ticket_api::domains::auth::models::*;
use ticket_api::domains::event::models::*;
use ticket_api::domains::order::models::*;
use ticket_api::domains::organizer::models::*;
use ticket_api::domains::wallet::models::*;
use ticket_api::shared::clients::PaymentOrder;

#[derive(OpenApi)]
#[openapi(
    paths(
        ticket_api::domains::auth::handlers::auth_handler::signup,
        ticket_api::domains::auth::handlers::auth_handler::signin,
        ticket_api::domains::auth::handlers::auth_handler::refresh,
        ticket_api::domains::auth::handlers::auth_handler::logout,
        ticket_api::domains::auth::handlers::auth_handler::get_me,
        ticket_api::domains::organizer::handlers::organizer_handler::apply,
        ticket_api::domains::organizer::handlers::organizer_handler::my_application,
        ticket_api::domains::organizer::handlers::organizer_handler::review,
        ticket_api::domains::event::handlers::event_handler::create_event,
        ticket_api::domains::event::handlers::event_handler::list_events,
        ticket_api::domains::event::handlers::event_handler::get_event,
        ticket_api::domains::wallet::handlers::wallet_handler::create_wallet,
        ticket_api::domains::wallet::handlers::wallet_handler::get_my_wallet,
        ticket_api::domains::wallet::handlers::wallet_handler::deposit,
        ticket_api::domains::wallet::handlers::wallet_handler::withdraw,
        ticket_api::domains::wallet::handlers::wallet_handler::create_topup_order,
        ticket_api::domains::wallet::handlers::wallet_handler::list_wallets,
        ticket_api::domains::order::handlers::order_handler::create_order,
        ticket_api::domains::order::handlers::order_handler::my_orders,
        ticket_api::domains::order::handlers::order_handler::get_order
    ),
    components(schemas(
        SignupRequest,
        SignupResponse,
        SigninRequest,
        SigninResponse,
        RefreshTokenRequest,
        RefreshTokenResponse,
        LogoutRequest,
        LogoutResponse,
        UserResponse,
        UserRole,
        ApplyRequest,
        ReviewRequest,
        ApplicationResponse,
        OrganizerApplication,
        ApplicationStatus,
        Event,
        CreateEventRequest,
        CreateTierRequest,
        EventResponse,
        EventListResponse,
        TicketTier,
        WalletResponse,
        CreateWalletRequest,
        DepositRequest,
        WithdrawRequest,
        TopUpOrderRequest,
        WalletTransaction,
        TransactionType,
        PaymentOrder,
        CreateOrderRequest,
        OrderResponse,
        OrdersResponse,
        TicketOrder,
        OrderStatus,
        PaymentMethod
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Authentication API endpoints"),
        (name = "Organizers", description = "Organizer application API endpoints"),
        (name = "Events", description = "Event listing API endpoints"),
        (name = "Wallet", description = "Wallet API endpoints (balance and transaction log)"),
        (name = "Orders", description = "Ticket order API endpoints")
    ),
    info(
        title = "Ticket API Server",
        description = "API server for event ticketing with wallet payments",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme: adds the "Authorize" button in Swagger UI
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticket_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    db.initialize()
        .await
        .context("Failed to initialize database")?;

    let app_state = AppState::new(db, &config).context("Failed to initialize AppState")?;

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .context("Invalid CORS origin")?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("Server running on http://{}", config.bind_addr);
    tracing::info!("Swagger UI available at http://{}/api", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
