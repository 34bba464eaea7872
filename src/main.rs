#[macro_use]
extern crate diesel;
extern crate dotenv;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use diesel::mysql::MysqlConnection;
use diesel::r2d2::{ConnectionManager, Pool};

mod config;
mod models;
mod routes;
mod schema;

pub type DbPool = Pool<ConnectionManager<MysqlConnection>>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env();

    let manager = ConnectionManager::<MysqlConnection>::new(config.database_url());
    let pool = match Pool::builder().build(manager) {
        Ok(pool) => {
            log::info!(
                "Connected to MySQL at {}:{}/{}",
                config.db_host,
                config.db_port,
                config.db_database
            );
            pool
        }
        Err(e) => {
            log::error!("Couldn't connect to MySQL: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    let bind_addr = config.bind_addr();
    log::info!("Server is running on port {}", config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .data(pool.clone())
            .service(routes::videos::list_videos)
            .service(routes::videos::search_videos)
            .service(routes::videos::watch_video)
            .service(routes::users::get_user)
            .service(routes::users::create_user)
            .service(routes::docs::api_docs)
    })
    .bind(bind_addr)?
    .run()
    .await
}
