use std::sync::{Arc, Mutex};

use scripture_resolver::{Error, NowProvider, Provider, Result};

const INDEX: &str = r#"<html><body>
  <nav><a href="/">Home</a> <a href="/king-james-version/about">About</a></nav>
  <ul class="books">
    <li><a href="/king-james-version/old-testament/genesis">Genesis</a></li>
    <li><a href="/king-james-version/old-testament/exodus">Exodus</a></li>
  </ul>
</body></html>"#;

const GENESIS_1: &str = r#"<html><body><div class="chapter">
  <div class="verse"><span class="verse-number">1</span> In the beginning God created the heaven and the earth.</div>
  <div class="verse"><span class="verse-number">2</span> And the earth was without form, and void;</div>
</div></body></html>"#;

fn provider(seen: Arc<Mutex<Vec<String>>>) -> NowProvider {
    NowProvider::with_fetcher(
        "https://biblenow.net",
        Arc::new(move |url: &str| -> Result<String> {
            if let Ok(mut seen) = seen.lock() {
                seen.push(url.to_string());
            }
            match url {
                "https://biblenow.net/king-james-version" => Ok(INDEX.to_string()),
                "https://biblenow.net/king-james-version/old-testament/genesis/1" => {
                    Ok(GENESIS_1.to_string())
                }
                _ => Err(Error::HttpStatusError { status: 404, url: url.to_string() }),
            }
        }),
    )
}

#[test]
fn first_book_link_is_genesis() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let provider = provider(Arc::clone(&seen));

    match provider.get_verse("genesis", "1", Some("1"), "KJV") {
        Ok(text) => assert_eq!(text, "In the beginning God created the heaven and the earth."),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
    let urls = seen.lock().map(|s| s.clone()).unwrap_or_default();
    assert_eq!(
        urls,
        vec![
            "https://biblenow.net/king-james-version",
            "https://biblenow.net/king-james-version/old-testament/genesis/1",
        ]
    );
}

#[test]
fn whole_chapter_joins_verses() {
    let provider = provider(Arc::new(Mutex::new(Vec::new())));
    let text = provider.get_verse("Genesis", "1", None, "kjv").unwrap_or_default();
    assert_eq!(
        text,
        "In the beginning God created the heaven and the earth. And the earth was without form, and void;"
    );
}

#[test]
fn book_beyond_discovered_links_is_out_of_range() {
    let provider = provider(Arc::new(Mutex::new(Vec::new())));
    match provider.get_verse("Leviticus", "1", Some("1"), "KJV") {
        Err(Error::BookIndexOutOfRange { index, available }) => {
            assert_eq!(index, 2);
            assert_eq!(available, 2);
        }
        other => panic!("expected BookIndexOutOfRange, got {other:?}"),
    }
}

#[test]
fn unknown_book_and_unsupported_search() {
    let provider = provider(Arc::new(Mutex::new(Vec::new())));
    assert!(matches!(
        provider.get_verse("Hezekiah", "1", None, "KJV"),
        Err(Error::UnknownBook(_))
    ));
    assert!(matches!(
        provider.search_words("light", "KJV"),
        Err(Error::UnsupportedOperation { provider: "now", .. })
    ));
}

#[test]
fn missing_chapter_surfaces_status() {
    let provider = provider(Arc::new(Mutex::new(Vec::new())));
    assert!(matches!(
        provider.get_verse("Exodus", "1", None, "KJV"),
        Err(Error::HttpStatusError { status: 404, .. })
    ));
}

#[test]
fn version_listing_reads_genesis_links() {
    let page = r#"<html><body>
        <a href="/king-james-version/old-testament/genesis">King James Version</a>
        <a href="/world-english-bible/old-testament/genesis/1">World English Bible</a>
        <a href="/douay-rheims/old-testament/genesis">Douay-Rheims</a>
        <a href="/king-james-version/old-testament/exodus">Exodus</a>
    </body></html>"#;
    let provider = NowProvider::with_fetcher(
        "https://biblenow.net",
        Arc::new(move |_: &str| -> Result<String> { Ok(page.to_string()) }),
    );
    let versions = provider.get_versions().unwrap_or_default();
    let summary: Vec<_> = versions.iter().map(|v| (v.value.as_str(), v.code.as_str())).collect();
    assert_eq!(
        summary,
        vec![
            ("king-james-version", "KJV"),
            ("world-english-bible", "WEB"),
            ("douay-rheims", "DOUAY-RHEIMS"),
        ]
    );
}
