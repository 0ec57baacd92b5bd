//! Shared fixtures for the wiremock-backed tests.
#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use wikifit_client::{WikimediaClient, WikimediaConfig};
use wikifit_core::Source;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_USER_AGENT: &str = "wikifit-test/1.0";

/// Client whose `source` requests go to `server`.
pub fn client_for(server: &MockServer, source: Source, timeout: Duration) -> WikimediaClient {
    let mut config = WikimediaConfig { user_agent: TEST_USER_AGENT.into(), timeout, ..Default::default() };
    config.endpoints.insert(source, server.uri());
    WikimediaClient::new(config).unwrap()
}

pub fn summary_body(title: &str) -> Value {
    json!({
        "type": "standard",
        "title": title,
        "description": "practice of focusing the mind",
        "extract": format!("{title} is a practice in which an individual trains attention and awareness."),
        "thumbnail": {"source": "https://upload.wikimedia.org/thumb/meditation.jpg", "width": 320, "height": 240},
        "content_urls": {"desktop": {"page": format!("https://en.wikipedia.org/wiki/{title}")}}
    })
}

pub fn extract_body(title: &str, text: &str) -> Value {
    json!({"batchcomplete": true, "query": {"pages": [{"pageid": 101, "ns": 0, "title": title, "extract": text}]}})
}

pub fn missing_page_body(title: &str) -> Value {
    json!({"batchcomplete": true, "query": {"pages": [{"ns": 0, "title": title, "missing": true}]}})
}

pub fn search_body(hits: &[(&str, &str)]) -> Value {
    let search: Vec<Value> = hits
        .iter()
        .map(|(title, snippet)| json!({"ns": 0, "title": title, "snippet": snippet}))
        .collect();
    json!({"batchcomplete": true, "query": {"searchinfo": {"totalhits": search.len()}, "search": search}})
}

pub fn imageinfo_body(files: &[&str]) -> Value {
    let pages: Vec<Value> = files
        .iter()
        .map(|file| {
            json!({
                "ns": 6,
                "title": file,
                "imageinfo": [{
                    "thumburl": format!("https://upload.wikimedia.org/thumb/300px-{}", file.trim_start_matches("File:")),
                    "url": format!("https://upload.wikimedia.org/{}", file.trim_start_matches("File:")),
                    "extmetadata": {"ImageDescription": {"value": "<p>Seated <b>meditation</b></p>"}}
                }]
            })
        })
        .collect();
    json!({"batchcomplete": true, "query": {"pages": pages}})
}

pub fn entity_search_body(id: &str) -> Value {
    json!({"searchinfo": {"search": "meditation"}, "search": [{"id": id, "label": "meditation"}], "success": 1})
}

pub fn entity_body(id: &str) -> Value {
    json!({
        "entities": {
            id: {
                "type": "item",
                "id": id,
                "labels": {"en": {"language": "en", "value": "meditation"}},
                "descriptions": {"en": {"language": "en", "value": "practice of focusing the mind"}},
                "claims": {
                    "P1995": [{"mainsnak": {"snaktype": "value", "property": "P1995", "datatype": "wikibase-item",
                        "datavalue": {"value": {"entity-type": "item", "id": "Q7867"}, "type": "wikibase-entityid"}}}]
                }
            }
        },
        "success": 1
    })
}

/// Mount a successful response for `source` and `term` on `server`.
pub async fn mount_success(server: &MockServer, source: Source, term: &str) {
    match source {
        Source::Wikipedia => {
            Mock::given(method("GET"))
                .and(path(format!("/api/rest_v1/page/summary/{}", term.replace(' ', "_"))))
                .respond_with(ResponseTemplate::new(200).set_body_json(summary_body(term)))
                .mount(server)
                .await;
        }
        Source::Commons => {
            Mock::given(method("GET"))
                .and(path("/w/api.php"))
                .and(query_param("list", "search"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(search_body(&[("File:Zazen.jpg", ""), ("File:Lotus position.png", "")])),
                )
                .mount(server)
                .await;
            Mock::given(method("GET"))
                .and(path("/w/api.php"))
                .and(query_param("prop", "imageinfo"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(imageinfo_body(&["File:Lotus position.png", "File:Zazen.jpg"])),
                )
                .mount(server)
                .await;
        }
        Source::Wikisource => {
            Mock::given(method("GET"))
                .and(path("/w/api.php"))
                .and(query_param("list", "search"))
                .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&[(
                    "Meditations (Casaubon)",
                    "The <span class=\"searchmatch\">meditations</span> of Marcus Aurelius",
                )])))
                .mount(server)
                .await;
        }
        Source::Wikidata => {
            Mock::given(method("GET"))
                .and(path("/w/api.php"))
                .and(query_param("action", "wbsearchentities"))
                .respond_with(ResponseTemplate::new(200).set_body_json(entity_search_body("Q36675")))
                .mount(server)
                .await;
            Mock::given(method("GET"))
                .and(path("/w/api.php"))
                .and(query_param("action", "wbgetentities"))
                .respond_with(ResponseTemplate::new(200).set_body_json(entity_body("Q36675")))
                .mount(server)
                .await;
        }
        _ => {
            Mock::given(method("GET"))
                .and(path("/w/api.php"))
                .and(query_param("prop", "extracts"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(extract_body(term, &format!("{} entry from {}.", term, source))),
                )
                .mount(server)
                .await;
        }
    }
}

/// In-memory sink for JSON-formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    /// Capture events emitted on the current thread until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn events(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Events that carry a `source` field, i.e. adapter outcome records.
    pub fn outcome_events(&self) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter(|event| event["fields"].get("outcome").is_some())
            .collect()
    }

    pub fn has_level(&self, level: &str) -> bool {
        self.events().iter().any(|event| event["level"] == level)
    }
}
