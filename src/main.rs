use actix_web::{middleware::Logger, App, HttpServer};

use wordbook::{auth::SessionMiddleware, config::Config, routes, store, AppState};

fn startup_error(err: wordbook::AppError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_env().map_err(startup_error)?;
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let store = store::connect(&config).await.map_err(startup_error)?;
    let state = AppState::from_config(store, &config);

    log::info!("Starting wordbook server at {}", config.server_url());
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(SessionMiddleware)
            .wrap(Logger::default())
            .configure(move |cfg| state.configure(cfg))
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
