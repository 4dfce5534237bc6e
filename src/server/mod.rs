pub mod view;

use crate::{config::Config, models::RenderContext, pipeline::Pipeline};
use actix_web::{http::header::ContentType, middleware, web, App, HttpResponse, HttpServer};
use serde::Deserialize;

pub use view::{escape_html, render_page};

#[derive(Debug, Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub prompt_text: String,
}

fn page(context: &RenderContext) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_page(context))
}

pub async fn index() -> HttpResponse {
    page(&RenderContext::empty())
}

pub async fn submit(pipeline: web::Data<Pipeline>, form: web::Form<PromptForm>) -> HttpResponse {
    let outcome = pipeline.run(&form.prompt_text).await;
    page(&RenderContext::from(outcome))
}

/// Mounts the single page on `/`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index))
            .route(web::post().to(submit)),
    );
}

pub async fn run(config: &Config, pipeline: Pipeline) -> std::io::Result<()> {
    let pipeline = web::Data::new(pipeline);

    HttpServer::new(move || {
        App::new()
            .app_data(pipeline.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{StubExpander, StubImages};
    use actix_web::test;
    use std::sync::atomic::Ordering;

    async fn body_of(resp: actix_web::dev::ServiceResponse) -> String {
        let body = test::read_body(resp).await;
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_get_renders_empty_form() {
        let expander = StubExpander::ok("detailed");
        let pipeline = Pipeline::new(expander.clone(), StubImages::ok(&[]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pipeline))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let html = body_of(resp).await;
        assert!(html.contains("<form method=\"post\""));
        assert!(!html.contains("<img"));
        assert_eq!(expander.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_post_renders_first_image() {
        let pipeline = Pipeline::new(
            StubExpander::ok("detailed"),
            StubImages::ok(&["https://cdn.example.com/1.png", "https://cdn.example.com/2.png"]),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pipeline))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_form(&[("prompt_text", "a fox")])
            .to_request();
        let html = body_of(test::call_service(&app, req).await).await;

        assert!(html.contains(">\na fox</textarea>"));
        assert!(html.contains("<img src=\"https://cdn.example.com/1.png\""));
        assert!(!html.contains("2.png"));
    }

    #[actix_web::test]
    async fn test_post_blank_input_matches_get_view() {
        let expander = StubExpander::ok("detailed");
        let images = StubImages::ok(&["https://cdn.example.com/1.png"]);
        let pipeline = Pipeline::new(expander.clone(), images.clone());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pipeline))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_form(&[("prompt_text", "   ")])
            .to_request();
        let posted = body_of(test::call_service(&app, req).await).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let fetched = body_of(test::call_service(&app, req).await).await;

        assert_eq!(posted, fetched);
        assert_eq!(expander.calls.load(Ordering::SeqCst), 0);
        assert_eq!(images.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_post_without_field_is_blank_input() {
        let expander = StubExpander::ok("detailed");
        let pipeline = Pipeline::new(expander.clone(), StubImages::ok(&[]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pipeline))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_form(&[("other", "x")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(expander.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_post_expansion_error_keeps_input() {
        let pipeline = Pipeline::new(
            StubExpander::failing("HTTP 503"),
            StubImages::ok(&["https://cdn.example.com/1.png"]),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pipeline))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_form(&[("prompt_text", "a fox")])
            .to_request();
        let html = body_of(test::call_service(&app, req).await).await;

        assert!(html.contains(">\na fox</textarea>"));
        assert!(html.contains("Prompt generation failed"));
        assert!(html.contains("HTTP 503"));
        assert!(!html.contains("<img"));
    }
}
