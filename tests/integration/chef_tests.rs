//! Integration tests for the chef
//!
//! These tests use wiremock to serve an archive page and run the full
//! chef end-to-end against a fake video resolver.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use toybox_chef::config::{BlockRule, Config};
use toybox_chef::tree::Node;
use toybox_chef::video::{youtube_id, ResolveError, ResolvedVideo, VideoRequest, VideoResolver};
use toybox_chef::{run_chef, ChefError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARCHIVE_PAGE: &str = r#"<html><head><title>Films</title></head><body>
<div id="langs">
<div id="English">
  <p>Air:</p>
  <p><a href="https://www.youtube.com/watch?v=AAAAAAAAAA1">Balloon Pump - English 12MB</a></p>
  <p><a href="https://youtu.be/AAAAAAAAAA1">Balloon Pump again</a></p>
  <br>
  <p>Water:</p>
  <p><a href="https://youtu.be/BBBBBBBBBB2">Paper Boat</a></p>
  <p><a href="https://youtu.be/NNNNNNNNNN3">Restricted Toy</a></p>
  <p><a href="https://youtu.be/GGGGGGGGGG4">Gone Toy</a></p>
  <p><a href="http://www.arvindguptatoys.com/books.html">Books</a></p>
</div>
<div id="Nepali">
  <p>Toys:</p>
  <p><a href="https://youtu.be/CCCCCCCCCC5">Spinning Top Nepali</a></p>
  <p>More:</p>
  <p><a href="https://youtu.be/DDDDDDDDDD6">Flying Bird 07</a></p>
</div>
<div id="Russian">
  <p><a href="https://youtu.be/RRRRRRRRRR7">Russian intro</a></p>
  <p><a href="https://youtu.be/RRRRRRRRRR8">Russian part2</a></p>
  <p><a href="https://youtu.be/FFFFFFFFFF9">French intro</a></p>
</div>
<div id="Klingon"><p>Qapla:</p></div>
<div><p>no language here</p></div>
</div>
</body></html>"#;

/// Resolver answering from a fixed table, recording every id it is asked for
#[derive(Clone, Default)]
struct FakeResolver {
    videos: HashMap<String, bool>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeResolver {
    /// `permissive` videos resolve with a Creative Commons license, the
    /// others with the platform's standard license; unknown ids fail
    fn new(videos: &[(&str, bool)]) -> Self {
        Self {
            videos: videos
                .iter()
                .map(|(id, permissive)| (id.to_string(), *permissive))
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoResolver for FakeResolver {
    async fn resolve(&self, request: &VideoRequest) -> Result<ResolvedVideo, ResolveError> {
        let id = youtube_id(&request.url).unwrap_or_default();
        self.calls.lock().unwrap().push(id.clone());

        let permissive = *self
            .videos
            .get(&id)
            .ok_or_else(|| ResolveError::Unavailable(request.url.clone()))?;
        let license = if permissive {
            "Creative Commons Attribution license (reuse allowed)"
        } else {
            "Standard YouTube License"
        };

        Ok(ResolvedVideo {
            unique_id: id.clone(),
            title: format!("Platform title {}", id),
            description: format!("Description of {}", id),
            thumbnail: Some(format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id)),
            language_code: request.language_code.clone(),
            license: Some(license.to_string()),
            license_is_permissive: permissive,
        })
    }
}

fn page_resolver() -> FakeResolver {
    FakeResolver::new(&[
        ("AAAAAAAAAA1", true),
        ("BBBBBBBBBB2", true),
        ("NNNNNNNNNN3", false),
        ("CCCCCCCCCC5", true),
        ("DDDDDDDDDD6", true),
        ("RRRRRRRRRR7", true),
        ("RRRRRRRRRR8", true),
        ("FFFFFFFFFF9", true),
    ])
}

/// Creates a test configuration reading the page from `base_url`, with
/// every file under `dir`
fn create_test_config(base_url: &str, dir: &Path) -> Config {
    let mut config = Config::default();
    config.source.url = format!("{}/films.html", base_url);
    config.page = BlockRule::Selector {
        selector: "div#langs > div".to_string(),
    };
    config.paths.skip_cache = dir.join("cache_skip_videos.json").display().to_string();
    config.paths.skip_report = dir.join("skip_videos.txt").display().to_string();
    config.paths.output = dir.join("channel.json").display().to_string();
    config.paths.video_cache_dir = dir.join("youtubecache").display().to_string();
    config
}

async fn serve_page(body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/films.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;
    mock_server
}

fn titles(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|n| n.title()).collect()
}

#[tokio::test]
async fn test_full_run_builds_all_layouts() {
    let mock_server = serve_page(ARCHIVE_PAGE).await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());

    let report = run_chef(config, Box::new(page_resolver())).await.unwrap();
    let channel = &report.channel;

    // English, Nepali, then the two languages split out of the Russian block
    assert_eq!(
        titles(&channel.children),
        vec!["English", "Nepali", "Russian", "French"]
    );

    // Standard layout: language -> topic -> video
    let english = channel.children[0].as_topic().unwrap();
    assert_eq!(english.source_id, "arvind-parent-topic-english");
    assert_eq!(titles(&english.children), vec!["Air", "Water"]);
    let air = english.children[0].as_topic().unwrap();
    assert_eq!(air.source_id, "arvind-child-topic-Air");
    assert_eq!(air.children.len(), 1);
    let balloon = air.children[0].as_video().unwrap();
    assert_eq!(balloon.source_id, "arvind-video-AAAAAAAAAA1");
    assert_eq!(balloon.title, "Balloon Pump");
    assert_eq!(balloon.files[0].youtube_id, "AAAAAAAAAA1");
    assert_eq!(balloon.files[0].language, "en");
    let water = english.children[1].as_topic().unwrap();
    assert_eq!(titles(&water.children), vec!["Paper Boat"]);

    // Single layout: videos directly under the language, topics flattened
    let nepali = channel.children[1].as_topic().unwrap();
    assert!(nepali.children.iter().all(|n| n.as_video().is_some()));
    assert_eq!(titles(&nepali.children), vec!["Spinning Top", "Flying Bird"]);
    assert_eq!(nepali.children[0].as_video().unwrap().files[0].language, "ne");

    // Multi-language layout: one top-level node per title prefix
    let russian = channel.children[2].as_topic().unwrap();
    let french = channel.children[3].as_topic().unwrap();
    assert_eq!(titles(&russian.children), vec!["intro", "part2"]);
    assert_eq!(french.source_id, "arvind-parent-topic-french");
    assert_eq!(french.children[0].as_video().unwrap().files[0].language, "fr");

    let stats = &report.stats;
    assert_eq!(stats.languages_processed, 3);
    assert_eq!(stats.languages_skipped, 2);
    assert_eq!(stats.languages_failed, 0);
    assert_eq!(stats.topics, 2);
    assert_eq!(stats.videos_added, 7);
    assert_eq!(stats.videos_skipped, 2);
    assert_eq!(stats.videos_duplicate, 1);
    assert_eq!(channel.video_count(), 7);
}

#[tokio::test]
async fn test_skipped_videos_reported_and_flushed() {
    let mock_server = serve_page(ARCHIVE_PAGE).await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());
    std::fs::write(&config.paths.skip_cache, r#"["OLDOLDOLD01"]"#).unwrap();
    let skip_cache = config.paths.skip_cache.clone();
    let skip_report = config.paths.skip_report.clone();

    let report = run_chef(config, Box::new(page_resolver())).await.unwrap();

    let report_text = std::fs::read_to_string(&skip_report).unwrap();
    assert_eq!(
        report_text,
        "en - Water - https://youtu.be/NNNNNNNNNN3 - Standard YouTube License\n\
         en - Water - https://youtu.be/GGGGGGGGGG4 - \n"
    );

    // This run's ids first, then what was already on disk
    let persisted: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&skip_cache).unwrap()).unwrap();
    assert_eq!(persisted, vec!["NNNNNNNNNN3", "GGGGGGGGGG4", "OLDOLDOLD01"]);
    assert_eq!(report.skip_ids_written, 3);
}

#[tokio::test]
async fn test_second_run_does_not_resolve_skipped_videos() {
    let mock_server = serve_page(ARCHIVE_PAGE).await;
    let dir = tempfile::tempdir().unwrap();

    let first = create_test_config(&mock_server.uri(), dir.path());
    run_chef(first, Box::new(page_resolver())).await.unwrap();

    let second = create_test_config(&mock_server.uri(), dir.path());
    let skip_report = second.paths.skip_report.clone();
    let resolver = page_resolver();
    let report = run_chef(second, Box::new(resolver.clone())).await.unwrap();

    let calls = resolver.calls();
    assert!(!calls.contains(&"NNNNNNNNNN3".to_string()));
    assert!(!calls.contains(&"GGGGGGGGGG4".to_string()));
    assert_eq!(report.stats.videos_previously_skipped, 2);
    assert_eq!(report.stats.videos_skipped, 0);

    // The report is recreated every run
    assert_eq!(std::fs::read_to_string(&skip_report).unwrap(), "");
}

#[tokio::test]
async fn test_positional_rule_isolates_missing_slots() {
    // Language blocks sit at child 1 and 3 of the container's second child;
    // the third slot (child 5) does not exist
    let page = concat!(
        r#"<html><body><div><p>header</p><div>"#,
        r#"<span>-</span><div id="Hindi"><p>Paper:</p><p><a href="https://youtu.be/HHHHHHHHHH1">Paper Cup Hindi</a></p></div>"#,
        r#"<span>-</span><div id="Tamil"><p><a href="https://youtu.be/TTTTTTTTTT1">Top</a></p></div>"#,
        r#"</div></div></body></html>"#
    );
    let mock_server = serve_page(page).await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&mock_server.uri(), dir.path());
    config.page = BlockRule::Positional {
        container: "body > div".to_string(),
        section: 1,
        start: 1,
        stride: 2,
        count: 3,
    };

    let resolver = FakeResolver::new(&[("HHHHHHHHHH1", true), ("TTTTTTTTTT1", true)]);
    let report = run_chef(config, Box::new(resolver)).await.unwrap();

    assert_eq!(titles(&report.channel.children), vec!["Hindi", "Tamil"]);
    let hindi = report.channel.children[0].as_topic().unwrap();
    let paper = hindi.children[0].as_topic().unwrap();
    assert_eq!(paper.title, "Paper");
    assert_eq!(titles(&paper.children), vec!["Paper Cup"]);

    // Tamil has no heading: its video sits under the untitled topic
    let tamil = report.channel.children[1].as_topic().unwrap();
    assert_eq!(tamil.children[0].title(), "");
    assert_eq!(tamil.video_count(), 1);

    assert_eq!(report.stats.languages_processed, 2);
    assert_eq!(report.stats.languages_failed, 1);
}

#[tokio::test]
async fn test_missing_page_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/films.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());
    let skip_cache = config.paths.skip_cache.clone();

    let result = run_chef(config, Box::new(FakeResolver::default())).await;

    assert!(matches!(
        result,
        Err(ChefError::HttpStatus { status: 404, .. })
    ));
    assert!(!Path::new(&skip_cache).exists());
}
