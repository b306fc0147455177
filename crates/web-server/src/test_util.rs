use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use carousel_web_core::Photo;

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub fn photos(count: u64) -> Vec<Photo> {
    (1..=count)
        .map(|id| Photo {
            album_id: (id - 1) / 2 + 1,
            id,
            title: format!("photo {}", id),
            url: format!("https://via.placeholder.com/600/{}", id),
            thumbnail_url: format!("https://via.placeholder.com/150/{}", id),
        })
        .collect()
}

pub fn photos_json(count: u64) -> serde_json::Value {
    serde_json::to_value(photos(count)).unwrap()
}

async fn echo(req: HttpRequest) -> HttpResponse {
    let cache_control = req
        .headers()
        .get(actix_web::http::header::CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    HttpResponse::Ok().json(serde_json::json!([{
        "albumId": 1,
        "id": 1,
        "title": req.query_string(),
        "url": cache_control,
        "thumbnailUrl": "",
    }]))
}

/// Starts a local upstream answering `/photos` with `status` and `body`, and
/// `/echo` with a single photo whose title is the request's query string and
/// whose url is its `Cache-Control` header.
pub fn serve(status: StatusCode, body: String) -> url::Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    let server = HttpServer::new(move || {
        let body = body.clone();
        App::new()
            .route(
                "/photos",
                web::get().to(move || {
                    let body = body.clone();
                    async move {
                        HttpResponse::build(status)
                            .content_type("application/json")
                            .body(body)
                    }
                }),
            )
            .route("/echo", web::get().to(echo))
    })
    .workers(1)
    .disable_signals()
    .listen(listener)
    .unwrap()
    .run();

    actix_web::rt::spawn(server);

    url::Url::parse(&format!("http://{}/photos", address)).unwrap()
}

pub fn serve_echo() -> url::Url {
    let mut url = serve(StatusCode::NOT_FOUND, String::new());
    url.set_path("/echo");
    url
}

pub fn unreachable_url() -> url::Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    url::Url::parse(&format!("http://{}/photos", address)).unwrap()
}
