// src/main.rs

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::info;

use taskline::app_state::AppState;
use taskline::auth::Authentication;
use taskline::categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use taskline::config::Config;
use taskline::error::{json_config, query_config};
use taskline::repository::MongoDB;
use taskline::tasks::{
    create_task, delete_task, get_dashboard, get_task, list_tasks, task_stats, update_task,
    update_task_status, vital_tasks,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let mongodb = MongoDB::init(&config.mongo_uri, &config.database_name)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let state = web::Data::new(AppState::new(&mongodb, config.clone()));

    info!("Server running at http://{}", config.bind_addr);
    info!("Allowed CORS Origin: {}", config.frontend_origin);

    let frontend_origin = config.frontend_origin.clone();
    let jwt_secret = config.jwt_secret.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                http::header::CONTENT_TYPE,
                http::header::ACCEPT,
                http::header::AUTHORIZATION,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Authentication::new(&jwt_secret))
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(json_config())
            .app_data(query_config())
            // TASKS
            .service(
                web::scope("/tasks")
                    .route("", web::get().to(list_tasks))
                    .route("", web::post().to(create_task))
                    .route("/vital", web::get().to(vital_tasks))
                    .route("/stats", web::get().to(task_stats))
                    .route("/{task_id}", web::get().to(get_task))
                    .route("/{task_id}", web::put().to(update_task))
                    .route("/{task_id}", web::delete().to(delete_task))
                    .route("/{task_id}/status", web::put().to(update_task_status)),
            )
            // CATEGORIES
            .service(
                web::scope("/categories")
                    .route("", web::get().to(list_categories))
                    .route("", web::post().to(create_category))
                    .route("/{category_id}", web::get().to(get_category))
                    .route("/{category_id}", web::put().to(update_category))
                    .route("/{category_id}", web::delete().to(delete_category)),
            )
            .route("/dashboard", web::get().to(get_dashboard))
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
