use carousel_web_core::{ElementId, PhotoApiResponse, ALBUM_ID_PARAM, LIMIT_PARAM, OFFSET_PARAM};

#[derive(Debug, thiserror::Error)]
enum NewClientError {
    #[error("Invalid host '{0}'")]
    InvalidHost(String, #[source] http::uri::InvalidUri),
    #[error("Invalid request uri")]
    InvalidUri(#[source] http::Error),
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("Request failed")]
    RequestError(#[from] hyper::Error),
    #[error("Failed to decode {0} response")]
    DecodeError(http::StatusCode, #[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("Failed to create client")]
    NewClientError(#[from] NewClientError),
    #[error("Failed to fetch photos")]
    FetchError(#[from] FetchError),
}

/// The filter form, passed through untouched so the server does the validating.
struct Filters {
    album_ids: Vec<String>,
    offset: Option<String>,
    limit: Option<String>,
}

impl Filters {
    fn query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for album_id in &self.album_ids {
            serializer.append_pair(ALBUM_ID_PARAM, album_id);
        }
        if let Some(offset) = &self.offset {
            serializer.append_pair(OFFSET_PARAM, offset);
        }
        if let Some(limit) = &self.limit {
            serializer.append_pair(LIMIT_PARAM, limit);
        }
        serializer.finish()
    }
}

struct Client {
    http_client: hyper::client::Client<hyper::client::HttpConnector>,
    uri: http::Uri,
}

impl Client {
    pub fn new(host: &str, filters: &Filters) -> Result<Self, NewClientError> {
        use std::convert::TryFrom;

        let query_string = filters.query_string();
        let path_and_query = if query_string.is_empty() {
            "/api/photos".to_string()
        } else {
            format!("/api/photos?{}", query_string)
        };

        Ok(Self {
            http_client: hyper::client::Client::new(),
            uri: http::uri::Builder::new()
                .scheme(http::uri::Scheme::HTTP)
                .authority(
                    http::uri::Authority::try_from(host)
                        .map_err(|err| NewClientError::InvalidHost(host.to_string(), err))?,
                )
                .path_and_query(path_and_query.as_str())
                .build()
                .map_err(|err| NewClientError::InvalidUri(err))?,
        })
    }

    pub async fn fetch(&self) -> Result<(http::StatusCode, PhotoApiResponse), FetchError> {
        let response = self.http_client.get(self.uri.clone()).await?;
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await?;

        serde_json::from_slice(&body)
            .map(|body| (status, body))
            .map_err(|err| FetchError::DecodeError(status, err))
    }
}

fn render(status: http::StatusCode, response: &PhotoApiResponse) {
    if status.is_client_error() {
        println!(
            "Client error: {}",
            status.canonical_reason().unwrap_or("Unknown reason")
        );
    } else if status.is_server_error() {
        println!(
            "Server error: {}",
            status.canonical_reason().unwrap_or("Unknown reason")
        );
    }

    if let Some(photos) = &response.photos {
        if photos.is_empty() {
            println!("No photos");
        }
        for photo in photos {
            println!(
                "#{} album {} {} {}",
                photo.id, photo.album_id, photo.title, photo.url
            );
        }
    }

    for element_id in [ElementId::AlbumId, ElementId::Offset, ElementId::Limit].iter() {
        if let Some(error) = response.validation_error_for(*element_id) {
            println!("  {}: {}", element_id, error.message);
        }
    }

    if let Some(error) = &response.error {
        println!("  {}", error);
    }
}

async fn run(host: &str, filters: Filters) -> Result<(), RunError> {
    let client = Client::new(host, &filters)?;

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message("Loading photos");
    spinner.enable_steady_tick(100);

    let result = client.fetch().await;
    spinner.finish_and_clear();

    let (status, response) = result?;
    render(status, &response);
    Ok(())
}

#[derive(structopt::StructOpt)]
struct CliOptions {
    host: String,
    #[structopt(long = "album-id")]
    album_ids: Vec<String>,
    #[structopt(long)]
    offset: Option<String>,
    #[structopt(long)]
    limit: Option<String>,
}

#[tokio::main]
async fn main() {
    use structopt::StructOpt;

    let cli_options = CliOptions::from_args();

    let filters = Filters {
        album_ids: cli_options.album_ids,
        offset: cli_options.offset,
        limit: cli_options.limit,
    };

    if let Err(error) = run(&cli_options.host, filters).await {
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
