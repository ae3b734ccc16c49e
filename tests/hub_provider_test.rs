use std::sync::{Arc, Mutex};

use scripture_resolver::{Error, HubProvider, Provider, Result};

const CHAPTER: &str = r#"<html><body>
<div id="leftbox"><div class="padleft">
  <div class="chap">
    <p class="hdg">For God So Loved the World</p>
    <p class="reg"><span class="reftext"><a href="/john/3-16.htm"><b>16</b></a></span>For God so loved the world that He gave His one and only Son,<span class="fn">a</span> that everyone who believes in Him shall not perish but have eternal life.
    <span class="reftext"><a href="/john/3-17.htm"><b>17</b></a></span>For God did not send His Son into the world to condemn the world, but to save the world through Him.</p>
    <p class="reg"><span class="reftext"><a href="/john/3-18.htm"><b>18</b></a></span>Whoever believes in Him is not condemned,</p>
    <div class="footnote">a 16 Or <i>his only begotten Son</i></div>
  </div>
</div></div>
</body></html>"#;

fn provider_serving(page: &'static str, seen: Arc<Mutex<Vec<String>>>) -> HubProvider {
    HubProvider::with_fetcher(
        "https://biblehub.com",
        Arc::new(move |url: &str| -> Result<String> {
            if let Ok(mut seen) = seen.lock() {
                seen.push(url.to_string());
            }
            Ok(page.to_string())
        }),
    )
}

#[test]
fn single_verse_stops_at_next_marker() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let provider = provider_serving(CHAPTER, Arc::clone(&seen));

    match provider.get_verse("John", "3", Some("16"), "BSB") {
        Ok(text) => assert_eq!(
            text,
            "For God so loved the world that He gave His one and only Son, that everyone who believes in Him shall not perish but have eternal life."
        ),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
    let urls = seen.lock().map(|s| s.clone()).unwrap_or_default();
    assert_eq!(urls, vec!["https://biblehub.com/bsb/john/3.htm"]);
}

#[test]
fn range_spans_paragraphs() {
    let provider = provider_serving(CHAPTER, Arc::new(Mutex::new(Vec::new())));
    let text = provider.get_verse("John", "3", Some("17-18"), "bsb").unwrap_or_default();
    assert!(text.starts_with("For God did not send His Son"), "{text}");
    assert!(text.ends_with("Whoever believes in Him is not condemned,"), "{text}");
    assert!(!text.contains("begotten"), "{text}");
}

#[test]
fn out_of_range_is_not_found() {
    let provider = provider_serving(CHAPTER, Arc::new(Mutex::new(Vec::new())));
    assert!(matches!(
        provider.get_verse("John", "3", Some("30"), "bsb"),
        Err(Error::VerseNotFound(_))
    ));
    assert!(matches!(
        provider.get_verse("John", "3", Some("x"), "bsb"),
        Err(Error::InvalidRange(_))
    ));
}

#[test]
fn search_resolves_links() {
    let page = r#"<html><body>
        <div class="result"><a href="/john/3-16.htm">John 3:16</a> For God so loved the world<span class="fn">*</span></div>
        <div class="result"><a href="https://biblehub.com/1_john/4-8.htm">1 John 4:8</a> God is love.</div>
        <div class="result">No link here</div>
    </body></html>"#;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let provider = provider_serving(page, Arc::clone(&seen));

    let results = provider.search_words("loved", "NIV").unwrap_or_default();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].verse_reference, "John 3:16");
    assert_eq!(results[0].text, "For God so loved the world");
    assert_eq!(results[0].url, "https://biblehub.com/john/3-16.htm");
    assert_eq!(results[1].url, "https://biblehub.com/1_john/4-8.htm");

    let urls = seen.lock().map(|s| s.clone()).unwrap_or_default();
    assert_eq!(urls, vec!["https://biblehub.com/search.php?q=loved&v=niv"]);
}

#[test]
fn version_listing_reads_parallel_links() {
    let page = r#"<html><body>
        <a href="/niv/genesis/1.htm">New International Version</a>
        <a href="/esv/genesis/1.htm">English Standard Version</a>
        <a href="/niv/genesis/1.htm">NIV again</a>
        <a href="/genesis/1-2.htm">next verse</a>
    </body></html>"#;
    let provider = provider_serving(page, Arc::new(Mutex::new(Vec::new())));
    let versions = provider.get_versions().unwrap_or_default();
    let codes: Vec<_> = versions.iter().map(|v| (v.value.as_str(), v.code.as_str())).collect();
    assert_eq!(codes, vec![("niv", "NIV"), ("esv", "ESV")]);
}
