pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Wires the HTTP surface. Signup and login are public; everything touching
/// an established session sits behind the gatekeeper.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(users::signup)
        .service(users::login)
        .service(
            web::scope("/users/me")
                .wrap(AuthMiddleware)
                .service(users::me)
                .service(users::logout),
        )
        .service(
            web::scope("/todos")
                .wrap(AuthMiddleware)
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}
