mod api;
mod non_empty;
mod params;
#[cfg(test)]
mod test_util;
mod upstream;

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error("Failed to create upstream HTTP client")]
    HttpClientInitError(#[source] reqwest::Error),
    #[error("Failed to bind listen socket")]
    BindError(#[source] std::io::Error),
    #[error("Failed to run server")]
    RunError(#[source] std::io::Error),
}

struct StaticDirPath(std::path::PathBuf);

impl From<std::path::PathBuf> for StaticDirPath {
    fn from(path: std::path::PathBuf) -> Self {
        Self(path)
    }
}

impl std::ops::Deref for StaticDirPath {
    type Target = std::path::Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

async fn index(
    static_dir_path: actix_web::web::Data<StaticDirPath>,
) -> actix_web::Result<actix_files::NamedFile> {
    Ok(actix_files::NamedFile::open(
        static_dir_path.join("index.html"),
    )?)
}

/// Serves `/static` from `static_dir_path`; pair with `index` as the default
/// service so page routes fall back to `index.html`.
fn configure_static(
    static_dir_path: std::path::PathBuf,
) -> impl FnOnce(&mut actix_web::web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(actix_web::web::Data::new(StaticDirPath::from(
            static_dir_path.clone(),
        )))
        .service(actix_files::Files::new("/static", static_dir_path));
    }
}

async fn run(
    static_dir_path: std::path::PathBuf,
    photo_url: url::Url,
    revalidate: std::time::Duration,
    host: &str,
    port: u16,
) -> Result<(), ServerError> {
    let http_client = reqwest::Client::builder()
        .build()
        .map_err(|err| ServerError::HttpClientInitError(err))?;

    log::info!("Serving photos from {} on {}:{}", photo_url, host, port);

    let upstream =
        actix_web::web::Data::new(upstream::Client::new(http_client, photo_url, revalidate));

    actix_web::HttpServer::new(move || {
        actix_web::App::new()
            .app_data(upstream.clone())
            .service(actix_web::web::scope("/api").configure(api::configure))
            .configure(configure_static(static_dir_path.clone()))
            .default_service(actix_web::web::to(index))
    })
    .bind((host, port))
    .map_err(|err| ServerError::BindError(err))?
    .run()
    .await
    .map_err(|err| ServerError::RunError(err))
}

#[derive(structopt::StructOpt)]
struct CliOptions {
    #[structopt(long, default_value = "/usr/local/share/carousel/www")]
    static_dir_path: std::path::PathBuf,
    #[structopt(long, default_value = upstream::DEFAULT_PHOTO_URL)]
    photo_url: url::Url,
    #[structopt(long, default_value = "3600")]
    revalidate_secs: u64,
    #[structopt(short, long, default_value = "0.0.0.0")]
    host: String,
    #[structopt(short, long, default_value = "80")]
    port: u16,
}

#[actix_web::main]
async fn main() {
    use structopt::StructOpt;

    env_logger::init_from_env(env_logger::Env::new().filter("CAROUSELD_LOG"));

    let cli_options = CliOptions::from_args();

    if let Err(error) = run(
        cli_options.static_dir_path,
        cli_options.photo_url,
        std::time::Duration::from_secs(cli_options.revalidate_secs),
        &cli_options.host,
        cli_options.port,
    )
    .await
    {
        use std::error::Error;

        println!("Error: {}", error);

        let mut current = error.source();
        if current.is_some() {
            println!("");
            println!("Caused by:");
            while let Some(error) = current {
                println!("  {}", error);
                current = error.source();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};

    async fn get(static_dir_path: &std::path::Path, uri: &str) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .configure(super::configure_static(static_dir_path.to_path_buf()))
                .default_service(web::to(super::index)),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = response.status();
        let body = test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    fn static_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>carousel</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
        dir
    }

    #[actix_web::test]
    async fn unknown_paths_fall_back_to_index() {
        let dir = static_dir();

        let (status, body) = get(dir.path(), "/albums/3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>carousel</html>");
    }

    #[actix_web::test]
    async fn serves_static_assets() {
        let dir = static_dir();

        let (status, body) = get(dir.path(), "/static/app.js").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1);");
    }

    #[actix_web::test]
    async fn missing_index_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let (status, _) = get(dir.path(), "/").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
