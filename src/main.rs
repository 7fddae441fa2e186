use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use taskwarden::config::Config;
use taskwarden::routes;
use taskwarden::store::Store;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let bind_addr = (config.server_host.clone(), config.server_port);

    // One store and one config for the whole process, handed to the app by
    // reference; no hidden singletons.
    let store = web::Data::new(Store::new());
    let config_data = web::Data::new(config.clone());

    log::info!("Starting TaskWarden server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .expose_headers(["x-auth"])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
