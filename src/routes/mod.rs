pub mod auth;
pub mod health;
pub mod views;
pub mod words;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(
            web::resource(vec!["/", words::CATALOG_PATH]).route(web::get().to(words::get_defs)),
        )
        .service(words::search_get)
        .service(words::search_post)
        .service(words::random)
        .service(words::add_word_form)
        .service(words::add_word)
        .service(words::edit_word_form)
        .service(words::edit_word)
        .service(words::delete_word)
        .service(auth::register_form)
        .service(auth::register)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::profile)
        .service(auth::logout);
}
