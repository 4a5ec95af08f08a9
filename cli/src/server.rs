#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use precept::{Engine, Form, Responses};
    use serde::{Deserialize, Serialize};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tracing::{error, info};

    #[derive(Debug, Deserialize)]
    struct ValidateRequest {
        code: String,
        responses: Responses,
        form: Form,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    pub async fn start_server(host: &str, port: u16) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "precept=info,tower_http=info".into()),
            )
            .init();

        // the engine is stateless apart from its limits; every request gets
        // a fresh interpreter session
        let engine = Arc::new(Engine::new());

        let app = Router::new()
            .route("/health", get(health_check))
            .route("/validate", post(validate))
            .layer(CorsLayer::permissive())
            .with_state(engine);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Precept server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "precept",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn validate(
        State(engine): State<Arc<Engine>>,
        Json(payload): Json<ValidateRequest>,
    ) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
        if payload.code.trim().is_empty() {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Code cannot be empty".to_string(),
                }),
            ));
        }

        let result = engine
            .validate(&payload.form, &payload.responses)
            .map_err(|e| {
                error!("Validation failed for '{}': {}", payload.code, e);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Validation failed: {}", e),
                    }),
                )
            })?;

        info!(
            "Validated questionnaire '{}' with {} queries",
            payload.code,
            result.passed.len()
        );

        Ok(Json(result))
    }
}
