use crate::{
    appointment::{self, appointment_dto::CreateAppointmentRequest, Appointment, AppointmentStatus},
    auth::{
        self,
        auth_dto::{AuthResponse, LoginRequest, RegisterRequest},
    },
    doctor::{self, Doctor},
    health::{
        self,
        health_models::{
            EmergencyRequest, EmergencyResponse, HealthAdvice, HealthAdviceRequest,
            HealthTipResponse, Severity,
        },
    },
    middleware::auth_middleware,
    state::AppState,
    user::{self, UserResponse},
    water::{
        self,
        water_models::{WaterIntake, WaterIntakeRequest, WaterIntakeSummary},
    },
    websocket::ws_handler,
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::auth_handlers::register,
        auth::auth_handlers::login,
        user::user_handlers::get_current_user,
        doctor::doctor_handlers::get_doctors,
        doctor::doctor_handlers::get_doctor,
        appointment::appointment_handlers::get_appointments,
        appointment::appointment_handlers::create_appointment,
        health::health_handlers::get_health_advice,
        health::health_handlers::get_health_tip,
        health::health_handlers::request_emergency,
        water::water_handlers::add_water_intake,
        water::water_handlers::get_water_intake_history,
        water::water_handlers::get_water_intake_summary,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            Doctor,
            Appointment,
            AppointmentStatus,
            CreateAppointmentRequest,
            HealthAdviceRequest,
            HealthAdvice,
            Severity,
            HealthTipResponse,
            EmergencyRequest,
            EmergencyResponse,
            WaterIntake,
            WaterIntakeRequest,
            WaterIntakeSummary,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Current user"),
        (name = "doctors", description = "Doctor directory"),
        (name = "appointments", description = "Appointment booking"),
        (name = "health", description = "Symptom checker, tips and emergencies"),
        (name = "water", description = "Water intake tracking")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/doctors", get(doctor::get_doctors))
        .route("/doctors/:id", get(doctor::get_doctor));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/user", get(user::get_current_user))
        .route(
            "/appointments",
            get(appointment::get_appointments).post(appointment::create_appointment),
        )
        .route("/health-advice", post(health::get_health_advice))
        .route("/health-tip", get(health::get_health_tip))
        .route("/emergency", post(health::request_emergency))
        .route(
            "/water-intake",
            get(water::get_water_intake_history).post(water::add_water_intake),
        )
        .route("/water-intake/summary", get(water::get_water_intake_summary))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        // authenticates in the handler: browsers cannot send headers on the upgrade
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
