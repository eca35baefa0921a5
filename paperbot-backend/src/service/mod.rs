//! The downstream numeric service: stateless HTTP endpoints delegating to
//! small numerical routines.
//!
//! This is the artifact the pipeline is meant to replicate, kept in-tree
//! as the reference implementation. No persisted state, no authentication;
//! every request is a pure computation.

pub mod handlers;
pub mod numeric;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/optimize").route(web::post().to(handlers::optimize)));
    cfg.service(web::resource("/integrate").route(web::post().to(handlers::integrate)));
    cfg.service(web::resource("/statistics").route(web::post().to(handlers::statistics)));
    cfg.service(web::resource("/api/health").route(web::get().to(handlers::health)));
}
