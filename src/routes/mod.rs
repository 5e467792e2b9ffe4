pub mod health;
pub mod invitations;
pub mod partners;

use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::init))
        .service(web::scope("/invitations").configure(invitations::init))
        .service(web::scope("/partners").configure(partners::init));
}
