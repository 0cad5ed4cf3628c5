//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! category walks and article scraping end-to-end.

use chrono::Utc;
use newsprint::config::Config;
use newsprint::crawler::crawl;
use newsprint::output::{to_json_string, JsonOutput, OutputHandler};
use newsprint::{ArticleRecord, Crawler};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.crawler.base_url = base_url.to_string();
    config.crawler.category_url = Some(format!("{}/news/tech", base_url));
    config.crawler.rate_limit_delay = 0.0;
    config.crawler.respect_robots_txt = false;
    config.user_agent.user_agent = "TestBot/1.0".to_string();
    config
}

fn listing_html(hrefs: &[&str], has_next: bool) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a data-testid="internal-link" href="{}">Story</a>"#, href))
        .collect();
    let next = if has_next {
        r#"<a aria-label="Next" href="?page=2">Next</a>"#
    } else {
        ""
    };
    format!(
        "<html><head><title>Tech</title></head><body><main>{}</main><nav>{}</nav></body></html>",
        anchors, next
    )
}

fn article_html(title: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="sc-f98b1ad2-0 dfvxux">{}</h1>
        <time class="sc-801dd632-2" datetime="2025-05-01T09:00:00.000Z">1 May</time>
        <div class="ssrcss-68pt20-Text-TextContributorName">Alex Writer</div>
        <img srcset="/images/a-320.jpg 320w, /images/a-800.jpg 800w">
        <div data-component="text-block"><p>Opening paragraph.</p></div>
        <div data-component="text-block"><p>Closing paragraph.</p></div>
        <div class="ssrcss-1sh5v2i-TagListWrapper"><ul><li>Technology</li></ul></div>
        </body></html>"#,
        title
    )
}

/// Mounts the first listing page, matching only requests without a page query
async fn mount_first_page(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/news/tech"))
        .and(|request: &wiremock::Request| {
            !request.url.query_pairs().any(|(key, _)| key == "page")
        })
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/news/tech"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_article(server: &MockServer, id: &str, title: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/news/articles/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(title)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_discovery_follows_pagination() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_first_page(
        &server,
        listing_html(&["/news/articles/a1", "/news/articles/a2"], true),
    )
    .await;
    mount_page(
        &server,
        "2",
        listing_html(&["/news/articles/a2", "/news/articles/a3"], false),
    )
    .await;

    let crawler = Crawler::new(&create_test_config(&base)).unwrap();
    let links = crawler
        .discover_links(&format!("{}/news/tech", base), 5)
        .await;

    assert_eq!(
        links,
        vec![
            format!("{}/news/articles/a1", base),
            format!("{}/news/articles/a2", base),
            format!("{}/news/articles/a3", base),
        ]
    );
    assert_eq!(crawler.report().listing_pages, 2);
}

#[tokio::test]
async fn test_discovery_stops_on_page_without_new_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_first_page(&server, listing_html(&["/news/articles/a1"], true)).await;
    mount_page(&server, "2", listing_html(&["/news/articles/a1"], true)).await;
    Mock::given(method("GET"))
        .and(path("/news/tech"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["/news/articles/a9"], false)))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = Crawler::new(&create_test_config(&base)).unwrap();
    let links = crawler
        .discover_links(&format!("{}/news/tech", base), 5)
        .await;

    assert_eq!(links, vec![format!("{}/news/articles/a1", base)]);
}

#[tokio::test]
async fn test_page_two_failure_keeps_page_one_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_first_page(
        &server,
        listing_html(&["/news/articles/a1", "/news/articles/a2"], true),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/news/tech"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let crawler = Crawler::new(&create_test_config(&base)).unwrap();
    let links = crawler
        .discover_links(&format!("{}/news/tech", base), 3)
        .await;

    assert_eq!(links.len(), 2);
}

#[tokio::test]
async fn test_live_and_deep_links_are_filtered() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_first_page(
        &server,
        listing_html(
            &[
                "/news/articles/abc123",
                "/news/live/xyz",
                "/news/articles/abc123/extra",
                "/news/articles/liveblog1",
                "/sport/football",
            ],
            false,
        ),
    )
    .await;

    let crawler = Crawler::new(&create_test_config(&base)).unwrap();
    let links = crawler
        .discover_links(&format!("{}/news/tech", base), 1)
        .await;

    assert_eq!(links, vec![format!("{}/news/articles/abc123", base)]);
}

#[tokio::test]
async fn test_discovery_is_capped_at_fifty() {
    let server = MockServer::start().await;
    let base = server.uri();

    let hrefs: Vec<String> = (0..80).map(|i| format!("/news/articles/n{}", i)).collect();
    let refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
    mount_first_page(&server, listing_html(&refs, true)).await;
    Mock::given(method("GET"))
        .and(path("/news/tech"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = Crawler::new(&create_test_config(&base)).unwrap();
    let links = crawler
        .discover_links(&format!("{}/news/tech", base), 3)
        .await;

    assert_eq!(links.len(), 50);
}

#[tokio::test]
async fn test_fetch_article_is_idempotent() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/news/articles/once"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html("Only once")))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = Crawler::new(&create_test_config(&base)).unwrap();
    let url = format!("{}/news/articles/once", base);

    let first = crawler.fetch_article(&url, None).await;
    let second = crawler.fetch_article(&url, None).await;

    assert_eq!(first.unwrap().title.as_deref(), Some("Only once"));
    assert!(second.is_none());
}

#[tokio::test]
async fn test_article_fetch_failure_returns_none() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/news/articles/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let crawler = Crawler::new(&create_test_config(&base)).unwrap();
    let result = crawler
        .fetch_article(&format!("{}/news/articles/gone", base), None)
        .await;

    assert!(result.is_none());
    assert_eq!(crawler.report().articles_failed, 1);
}

#[tokio::test]
async fn test_scrape_category_end_to_end() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_first_page(
        &server,
        listing_html(
            &["/news/articles/e1", "/news/articles/e2", "/news/articles/e3"],
            true,
        ),
    )
    .await;
    mount_page(
        &server,
        "2",
        listing_html(&["/news/articles/e4", "/news/articles/e5"], false),
    )
    .await;
    for id in ["e1", "e2", "e3", "e4", "e5"] {
        mount_article(&server, id, &format!("Story {}", id)).await;
    }

    let started = Utc::now();
    let crawler = Crawler::new(&create_test_config(&base)).unwrap();
    let category_url = format!("{}/news/tech", base);

    let discovered = crawler.discover_links(&category_url, 2).await;
    let fresh = Crawler::new(&create_test_config(&base)).unwrap();
    let articles = fresh.scrape_category(&category_url, 2, 4).await;

    assert!(articles.len() <= 4);
    assert_eq!(articles.len(), 4);
    for article in &articles {
        assert!(article.scraped_at >= started);
        assert!(discovered.contains(&article.url));
        assert_eq!(article.category.as_deref(), Some("tech"));
        assert_eq!(article.author.as_deref(), Some("Alex Writer"));
        assert_eq!(article.timestamp.as_deref(), Some("2025-05-01T09:00:00.000Z"));
        assert_eq!(article.tags, vec!["Technology".to_string()]);
        assert_eq!(article.content, "Opening paragraph.\n\nClosing paragraph.");
        assert_eq!(article.images, vec![format!("{}/images/a-800.jpg", base)]);
    }
}

#[tokio::test]
async fn test_robots_txt_is_honoured() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nDisallow: /news/articles/private\n"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_first_page(
        &server,
        listing_html(&["/news/articles/public", "/news/articles/private"], false),
    )
    .await;
    mount_article(&server, "public", "Public").await;
    Mock::given(method("GET"))
        .and(path("/news/articles/private"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html("Private")))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&base);
    config.crawler.respect_robots_txt = true;
    let crawler = Crawler::new(&config).unwrap();

    let articles = crawler
        .scrape_category(&format!("{}/news/tech", base), 1, 10)
        .await;

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].url, format!("{}/news/articles/public", base));
    assert_eq!(crawler.report().robots_denied, 1);
}

#[tokio::test]
async fn test_crawl_entry_point_and_json_output() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_first_page(&server, listing_html(&["/news/articles/j1"], false)).await;
    mount_article(&server, "j1", "Ünïcode headline").await;

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("articles.json");
    let mut config = create_test_config(&base);
    config.output.json_path = json_path.to_string_lossy().into_owned();

    let (articles, report) = crawl(&config).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(report.articles_scraped, 1);

    JsonOutput::new(&json_path).write_articles(&articles).unwrap();

    let written = std::fs::read_to_string(&json_path).unwrap();
    assert_eq!(written, to_json_string(&articles).unwrap());
    assert!(written.contains("Ünïcode headline"));
    assert!(written.starts_with("[\n  {"));

    let parsed: Vec<ArticleRecord> = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, articles);
}

#[tokio::test]
async fn test_crawl_requires_category_url() {
    let mut config = create_test_config("http://127.0.0.1:9");
    config.crawler.category_url = None;
    assert!(crawl(&config).await.is_err());
}
