use crate::handlers::partners::{get_partner_directory, replace_partner_directory};
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::Value;

#[get("/all")]
async fn partners() -> impl Responder {
    let directory = get_partner_directory().await;
    HttpResponse::Ok().json(directory.as_ref())
}

#[post("")]
async fn replace(body: web::Json<Value>) -> impl Responder {
    match replace_partner_directory(body.into_inner()).await {
        Ok(count) => HttpResponse::Ok().body(format!("Loaded {} partner records.", count)),
        Err(e) => HttpResponse::BadRequest().body(format!("Error: {}", e)),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(partners).service(replace);
}
