use crate::handlers::invitations::find_invitations;
use crate::models::invitation::InvitationQuery;
use actix_web::{HttpResponse, Responder, post, web};

#[post("")]
async fn invitations(body: web::Json<InvitationQuery>) -> impl Responder {
    match find_invitations(body.into_inner()).await {
        Ok(matches) => HttpResponse::Ok().json(matches.as_ref()),
        Err(e) => HttpResponse::BadRequest().body(format!("Error: {}", e)),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(invitations);
}
