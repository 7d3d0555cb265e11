use async_trait::async_trait;
use bytes::Bytes;
use clashconv::config::SubscriptionConfig;
use clashconv::error::AppError;
use clashconv::fetch::{HttpFetcher, SubscriptionFetcher};
use clashconv::proto::Proxy;
use clashconv::subscription::{parse_subscription, ProxyAggregator};
use regex::Regex;
use std::collections::HashMap;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

// 按URL返回预设内容的拉取器，可为每个订阅设置延迟
struct ScriptedFetcher {
    responses: HashMap<String, (u64, Result<String, String>)>,
}

impl ScriptedFetcher {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    fn ok(mut self, url: &str, delay_ms: u64, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), (delay_ms, Ok(body.to_string())));
        self
    }

    fn fail(mut self, url: &str, delay_ms: u64) -> Self {
        self.responses
            .insert(url.to_string(), (delay_ms, Err("connection refused".to_string())));
        self
    }
}

#[async_trait]
impl SubscriptionFetcher for ScriptedFetcher {
    async fn fetch(&self, subscription: &SubscriptionConfig) -> Result<Bytes, AppError> {
        let (delay, response) = self
            .responses
            .get(&subscription.url)
            .cloned()
            .unwrap_or((0, Err("unknown url".to_string())));
        tokio::time::sleep(Duration::from_millis(delay)).await;
        response.map(Bytes::from).map_err(AppError::Fetch)
    }
}

const SUB_A: &str = r#"
proxies:
  - {name: a1, server: a1.example.com, port: 443, type: ss, cipher: aes-128-gcm, password: pw}
  - {name: a2, server: a2.example.com, port: 443, type: ss, cipher: aes-128-gcm, password: pw}
"#;

const SUB_B: &str = r#"
proxies:
  - {name: b1, server: b1.example.com, port: 8443, type: trojan, password: pw, udp: true}
  - {name: b2, server: b2.example.com, port: 8443, type: trojan, password: pw}
"#;

fn names(proxies: &[Proxy]) -> Vec<&str> {
    proxies.iter().map(|p| p.name.as_str()).collect()
}

fn subs(urls: &[&str]) -> Vec<SubscriptionConfig> {
    urls.iter().map(|u| SubscriptionConfig::new(*u)).collect()
}

#[tokio::test]
async fn test_merge_order_follows_declaration_not_latency() {
    let sources = subs(&["http://a.test/sub", "http://b.test/sub"]);
    let preloaded = vec![Proxy::new("local", "127.0.0.1", 1080)];

    // 第一个订阅响应更慢
    let slow_first = ScriptedFetcher::new()
        .ok("http://a.test/sub", 80, SUB_A)
        .ok("http://b.test/sub", 0, SUB_B);
    let first = ProxyAggregator::new(slow_first)
        .aggregate(&preloaded, &sources, None)
        .await;

    // 第二个订阅响应更慢
    let slow_second = ScriptedFetcher::new()
        .ok("http://a.test/sub", 0, SUB_A)
        .ok("http://b.test/sub", 80, SUB_B);
    let second = ProxyAggregator::new(slow_second)
        .aggregate(&preloaded, &sources, None)
        .await;

    assert_eq!(names(&first), vec!["local", "a1", "a2", "b1", "b2"]);
    assert_eq!(
        serde_yaml::to_string(&first).unwrap(),
        serde_yaml::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_duplicate_names_across_sources() {
    let sub = "proxies:\n  - {name: A, server: x.example.com, port: 1}\n";
    let fetcher = ScriptedFetcher::new()
        .ok("http://a.test/sub", 0, sub)
        .ok("http://b.test/sub", 0, sub);
    let sources = subs(&["http://a.test/sub", "http://b.test/sub"]);

    let proxies = ProxyAggregator::new(fetcher)
        .aggregate(&[], &sources, None)
        .await;

    assert_eq!(names(&proxies), vec!["A", "A[1]"]);
}

#[tokio::test]
async fn test_exclude_after_dedup() {
    let sub = r#"
proxies:
  - {name: ads-1, server: a.example.com, port: 1}
  - {name: ads-2, server: b.example.com, port: 2}
  - {name: good, server: c.example.com, port: 3}
"#;
    let fetcher = ScriptedFetcher::new().ok("http://a.test/sub", 0, sub);
    let exclude = Regex::new("^ads").unwrap();

    let proxies = ProxyAggregator::new(fetcher)
        .aggregate(&[], &subs(&["http://a.test/sub"]), Some(&exclude))
        .await;

    assert_eq!(names(&proxies), vec!["good"]);
}

#[tokio::test]
async fn test_failed_source_contributes_nothing() {
    let fetcher = ScriptedFetcher::new()
        .fail("http://a.test/sub", 10)
        .ok("http://b.test/sub", 0, SUB_B)
        .ok("http://c.test/sub", 0, "proxies: [this is not: valid");
    let sources = subs(&["http://a.test/sub", "http://b.test/sub", "http://c.test/sub"]);

    let proxies = ProxyAggregator::new(fetcher)
        .aggregate(&[], &sources, None)
        .await;

    assert_eq!(names(&proxies), vec!["b1", "b2"]);
}

#[tokio::test]
async fn test_source_overrides_udp_emoji_and_label() {
    let sub = r#"
proxies:
  - {name: "🇯🇵 Tokyo", server: jp.example.com, port: 443, udp: true, type: vmess, uuid: abc}
"#;
    let fetcher = ScriptedFetcher::new()
        .ok("http://a.test/sub", 0, sub)
        .ok("http://b.test/sub", 0, sub);
    let mut sources = subs(&["http://a.test/sub", "http://b.test/sub"]);
    sources[0].udp_enable = Some(false);
    sources[0].name = Some("air".to_string());
    // 空标签不加前缀
    sources[1].name = Some(String::new());

    let proxies = ProxyAggregator::new(fetcher)
        .aggregate(&[], &sources, None)
        .await;

    assert_eq!(names(&proxies), vec!["[air] Tokyo", " Tokyo"]);
    assert!(!proxies[0].udp);
    assert!(proxies[1].udp);
    // 未识别字段保留
    assert_eq!(
        proxies[0].extra.get("uuid").and_then(|v| v.as_str()),
        Some("abc")
    );
    assert_eq!(
        proxies[0].extra.get("type").and_then(|v| v.as_str()),
        Some("vmess")
    );
}

#[tokio::test]
async fn test_proxy_without_server_or_port_is_kept() {
    let sub = r#"
proxies:
  - {name: local-direct, type: direct}
  - {name: ok, server: b.example.com, port: 2}
"#;
    let source = SubscriptionConfig::new("http://a.test/sub");
    let parsed = parse_subscription(&source, sub.as_bytes()).unwrap();
    assert_eq!(names(&parsed), vec!["local-direct", "ok"]);
    assert_eq!(parsed[0].server, None);
    assert_eq!(parsed[0].port, None);
    assert_eq!(parsed[1].port, Some(2));

    let fetcher = ScriptedFetcher::new().ok("http://a.test/sub", 0, sub);
    let proxies = ProxyAggregator::new(fetcher)
        .aggregate(&[], &[source], None)
        .await;
    assert_eq!(names(&proxies), vec!["local-direct", "ok"]);

    // 缺失的字段不会写成 null
    let rendered = serde_yaml::to_value(&proxies[0]).unwrap();
    assert!(rendered.get("server").is_none());
    assert!(rendered.get("port").is_none());
    assert_eq!(rendered.get("type").and_then(|v| v.as_str()), Some("direct"));
}

#[tokio::test]
async fn test_force_udp_on() {
    let fetcher = ScriptedFetcher::new().ok("http://a.test/sub", 0, SUB_A);
    let mut sources = subs(&["http://a.test/sub"]);
    sources[0].udp_enable = Some(true);

    let proxies = ProxyAggregator::new(fetcher)
        .aggregate(&[], &sources, None)
        .await;

    assert!(proxies.iter().all(|p| p.udp));
}

#[tokio::test]
async fn test_preloaded_participate_in_dedup() {
    let sub = "proxies:\n  - {name: local, server: x.example.com, port: 1}\n";
    let fetcher = ScriptedFetcher::new().ok("http://a.test/sub", 0, sub);
    let preloaded = vec![
        Proxy::new("local", "127.0.0.1", 1080),
        Proxy::new("local", "127.0.0.1", 1081),
    ];

    let proxies = ProxyAggregator::new(fetcher)
        .aggregate(&preloaded, &subs(&["http://a.test/sub"]), None)
        .await;

    assert_eq!(names(&proxies), vec!["local", "local[1]", "local[2]"]);
}

#[tokio::test]
async fn test_http_fetcher_sends_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sub"))
        .and(header("User-Agent", "clash.meta"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SUB_A))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut good = SubscriptionConfig::new(format!("{}/sub", mock_server.uri()));
    good.headers
        .insert("User-Agent".to_string(), "clash.meta".to_string());
    let broken = SubscriptionConfig::new(format!("{}/broken", mock_server.uri()));

    let fetcher = HttpFetcher::new(Default::default());
    assert!(fetcher.fetch(&broken).await.is_err());

    let proxies = ProxyAggregator::new(fetcher)
        .aggregate(&[], &[broken, good], None)
        .await;

    assert_eq!(names(&proxies), vec!["a1", "a2"]);
}

#[tokio::test]
async fn test_http_fetcher_rejects_oversized_body() {
    let mock_server = MockServer::start().await;
    let body = "#".repeat(4096);

    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let mut sub = SubscriptionConfig::new(format!("{}/big", mock_server.uri()));
    sub.max_size = 1024;

    let result = HttpFetcher::new(Default::default()).fetch(&sub).await;
    assert!(matches!(result, Err(AppError::Fetch(_))));
}
