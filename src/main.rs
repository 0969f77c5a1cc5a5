use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use infra::config::AppConfigImpl;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use server::middleware::other;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 配置日志同时输出到控制台和文件
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // 创建文件 appender
    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {m}{n}",
        )))
        .build("app.log")?;

    // 配置 log4rs：同时输出到控制台和文件
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .appender(Appender::builder().build(
            "stdout",
            Box::new(log4rs::append::console::ConsoleAppender::builder().build()),
        ))
        .build(
            Root::builder()
                .appender("file")
                .appender("stdout")
                .build(log_level.parse().unwrap_or(log::LevelFilter::Info)),
        )
        .expect("invalid log configuration");

    log4rs::init_config(config).expect("logger already initialized");
    let cfg = AppConfigImpl::load().expect("failed to load configuration");
    let server_cfg = cfg.server();

    let app_state = server::AppState::new(cfg)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let app_state = web::Data::new(app_state);
    log::info!("Listening on {}:{}", server_cfg.host, server_cfg.port);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(Logger::new("%a %{User-Agent}i"))
            .configure(server::catalog_api::configure_service)
            .wrap(other::cors())
    })
    .bind((server_cfg.host.as_str(), server_cfg.port))?
    .run()
    .await
}
