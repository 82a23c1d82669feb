use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use pallet_check::types::{Axis, Catalog, Origin, PalletType, PlacedPallet, TypeId};
use pallet_check::{ContainerBounds, ViolationKind, validate};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct ValidateRequest {
    catalog: Vec<PalletType>,
    placements: Vec<PlacementRequest>,
    width: u32,
    height: u32,
    #[serde(default = "default_width_axis")]
    width_axis: Axis,
    #[serde(default = "default_height_axis")]
    height_axis: Axis,
}

#[derive(Deserialize, Serialize)]
struct PlacementRequest {
    type_id: TypeId,
    x: u32,
    y: u32,
    z: u32,
    #[serde(default)]
    rotated: bool,
}

fn default_width_axis() -> Axis {
    Axis::Y
}

fn default_height_axis() -> Axis {
    Axis::Z
}

#[derive(Serialize)]
#[serde(untagged)]
enum ValidateResponse {
    Accepted {
        accepted: bool,
        minimal_length: u32,
    },
    Rejected {
        accepted: bool,
        kind: ViolationKind,
        message: String,
        placements: Vec<usize>,
    },
}

async fn validate_plan(
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /validate"
    );

    let mut catalog = Catalog::new();
    for t in req.catalog {
        if t.quantity == 0 || t.length == 0 || t.width == 0 || t.height == 0 || t.order == 0 {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("pallet type {}: quantity, dimensions and order must be non-zero", t.id),
            ));
        }
        let id = t.id;
        if !catalog.insert(t) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("pallet type {} is defined twice", id),
            ));
        }
    }

    let placements: Vec<PlacedPallet> = req
        .placements
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let t = catalog
                .get(p.type_id)
                .ok_or_else(|| format!("placement {}: unknown pallet type {}", i, p.type_id))?;
            let placed = PlacedPallet::new(t, Origin::new(p.x, p.y, p.z), p.rotated);
            if !placed.is_within_range() {
                return Err(format!(
                    "placement {}: reaches past the largest representable coordinate",
                    i
                ));
            }
            Ok(placed)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let container = ContainerBounds::with_axes(req.width, req.width_axis, req.height, req.height_axis);

    let response = match validate(&placements, &catalog, &container) {
        Ok(report) => ValidateResponse::Accepted {
            accepted: true,
            minimal_length: report.minimal_length,
        },
        Err(violation) => ValidateResponse::Rejected {
            accepted: false,
            kind: violation.kind(),
            message: violation.to_string(),
            placements: violation.placements(),
        },
    };

    Ok(Json(response))
}

#[tokio::main]
async fn main() {
    let _sentry = std::env::var("SENTRY_DSN")
        .ok()
        .map(|dsn| sentry::init((dsn.as_str(), sentry::ClientOptions::default())));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/validate", post(validate_plan))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.expect("server error");
}
