//! 관리자 모듈 허브 메인 애플리케이션
//!
//! 모듈 레지스트리를 만들고 내장 기능 모듈을 백그라운드에서 부트스트랩한 뒤,
//! 관리 API와 접두사별 동적 모듈 라우트를 제공하는 HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use admin_module_hub::bootstrap::{run_bootstrap, BootstrapPlan};
use admin_module_hub::config::{
    CorsConfig, Environment, RateLimitConfig, RegistryConfig, ServerConfig,
};
use admin_module_hub::core::registry::ModuleRegistry;
use admin_module_hub::domain::models::auth::principal::{
    PRINCIPAL_ID_HEADER, PRINCIPAL_ROLES_HEADER,
};
use admin_module_hub::modules::builtin_modules;
use admin_module_hub::renderer::{DynamicRouteRenderer, ReadinessGate};
use admin_module_hub::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!(
        "🚀 관리자 모듈 허브 시작중... (environment: {})",
        Environment::current().as_str()
    );

    // 레지스트리는 전역 싱글톤이 아닌 명시적 컨텍스트로 주입됩니다
    let registry = Arc::new(ModuleRegistry::new());

    // 준비 게이트: 부트스트랩 완료 또는 제한 시간 경과 시 개방
    let gate = Arc::new(ReadinessGate::new());
    Arc::clone(&gate).spawn(Arc::clone(&registry), RegistryConfig::readiness_timeout());

    spawn_bootstrap(Arc::clone(&registry));

    let renderers: Vec<web::Data<DynamicRouteRenderer>> = RegistryConfig::route_prefixes()
        .iter()
        .map(|prefix| {
            info!("🧭 동적 라우트 렌더러 마운트: {}", prefix);
            web::Data::new(DynamicRouteRenderer::new(
                prefix,
                Arc::clone(&registry),
                Arc::clone(&gate),
            ))
        })
        .collect();

    // HTTP 서버 시작
    start_http_server(registry, renderers).await
}

/// 내장 모듈 부트스트랩을 백그라운드에서 실행합니다
///
/// 서버는 부트스트랩을 기다리지 않고 바로 요청을 받으며, 그동안 동적 라우트는
/// 로딩 응답(503)을 반환합니다.
fn spawn_bootstrap(registry: Arc<ModuleRegistry>) {
    actix_web::rt::spawn(async move {
        let plan = BootstrapPlan::from_env();
        let report = run_bootstrap(&registry, builtin_modules(), &plan).await;

        if report.failed.is_empty() {
            info!("✅ 모든 모듈이 성공적으로 로드되었습니다!");
        } else {
            warn!("⚠️ 일부 모듈 로드 실패: {:?}", report.failed);
        }
    });
}

/// HTTP 서버를 구성하고 실행합니다
///
/// # Errors
///
/// * `std::io::Error` - Rate Limiting 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    registry: Arc<ModuleRegistry>,
    renderers: Vec<web::Data<DynamicRouteRenderer>>,
) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Module API: http://{}/api/v1/modules", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "Rate Limiting 설정이 올바르지 않습니다 (0 값 불가)",
            )
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    let registry_data = web::Data::from(registry);

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(registry_data.clone())
            .configure(|cfg| configure_all_routes(cfg, &renderers))
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=admin_module_hub::core=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 허용 Origin은 `CORS_ALLOWED_ORIGINS`에서 읽고, 주체 헤더를 허용 헤더에 포함합니다.
fn configure_cors() -> Cors {
    let cors = CorsConfig::allowed_origins()
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .allowed_header(PRINCIPAL_ID_HEADER)
        .allowed_header(PRINCIPAL_ROLES_HEADER)
        .expose_headers(vec![header::RETRY_AFTER])
        .supports_credentials()
        .max_age(3600)
}
