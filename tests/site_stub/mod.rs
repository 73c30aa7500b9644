use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Local stand-in for the listing site. Routes are matched on the request
/// path with leading slashes collapsed, so `//film/x.html` hits `/film/x.html`.
pub struct SiteStub {
    pub base_url: String,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SiteStub {
    pub fn spawn(routes: Vec<(&str, String)>) -> Self {
        let routes: HashMap<String, String> = routes
            .into_iter()
            .map(|(path, body)| (path.to_owned(), body))
            .collect();

        let server = tiny_http::Server::http("127.0.0.1:0").expect("start site stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                let path = format!("/{}", url.trim_start_matches('/'));

                let response = match routes.get(&path) {
                    Some(body) => {
                        let header = tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"text/html; charset=utf-8"[..],
                        )
                        .expect("build header");
                        tiny_http::Response::from_string(body.clone())
                            .with_status_code(200)
                            .with_header(header)
                    }
                    None => tiny_http::Response::from_string("not found").with_status_code(404),
                };

                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for SiteStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn agenda_page(hrefs: &[&str]) -> String {
    let cards = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"    <div class="card entity-card">
      <h2 class="meta-title"><a class="meta-title-link" href="{href}">title</a></h2>
    </div>
"#
            )
        })
        .collect::<String>();
    format!("<!doctype html>\n<html>\n  <body>\n{cards}  </body>\n</html>\n")
}

pub fn movie_page(name: &str, ld_json: &str, release_date: Option<&str>) -> String {
    let entity = release_date
        .map(|date| format!(r#"<div data-entity='{{"releaseDate":"{date}"}}'></div>"#))
        .unwrap_or_default();
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta property="og:title" content="{name}" />
    <script type="application/ld+json">{ld_json}</script>
  </head>
  <body>
    <h1>{name}</h1>
    {entity}
  </body>
</html>
"#
    )
}

pub fn untitled_page() -> String {
    "<!doctype html>\n<html><head><title>Erreur</title></head><body></body></html>\n".to_owned()
}
