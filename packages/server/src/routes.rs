use actix_web::{HttpRequest, HttpResponse, web};
use pinned_models::SubjectKind;

use crate::{disconnect, emitter};
use crate::state::AppState;

/// Register the service's routes.
///
/// The login segment may be empty (`/user/`), and the bare `/user` and
/// `/org` paths are routed too, so a missing login reaches validation and
/// is answered with 400 instead of 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/user", web::get().to(user_handler))
        .route("/user/{username:[^/]*}", web::get().to(user_handler))
        .route("/org", web::get().to(org_handler))
        .route("/org/{orgname:[^/]*}", web::get().to(org_handler))
        .route("/health", web::get().to(|| async { "OK" }));
}

pub async fn user_handler(
    req: HttpRequest,
    path: Option<web::Path<String>>,
    state: web::Data<AppState>,
) -> HttpResponse {
    pinned_handler(SubjectKind::Account, &req, path, &state).await
}

pub async fn org_handler(
    req: HttpRequest,
    path: Option<web::Path<String>>,
    state: web::Data<AppState>,
) -> HttpResponse {
    pinned_handler(SubjectKind::Organization, &req, path, &state).await
}

async fn pinned_handler(
    kind: SubjectKind,
    req: &HttpRequest,
    path: Option<web::Path<String>>,
    state: &AppState,
) -> HttpResponse {
    let login = path.map(web::Path::into_inner).unwrap_or_default();

    let ctx = state.context();
    let _cancel = ctx.cancel_on_drop();

    let fetch = state.service.fetch(&ctx, kind, login);
    tokio::pin!(fetch);

    let outcome = tokio::select! {
        outcome = &mut fetch => outcome,
        () = disconnect::disconnected(req) => {
            log::debug!("Client disconnected, cancelling {} request", req.path());
            ctx.cancel();
            fetch.await
        }
    };

    emitter::emit(outcome, state.opaque_errors)
}
