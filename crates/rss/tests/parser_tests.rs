// ABOUTME: Integration tests for RSS feed deserialization.
// ABOUTME: Full-fixture round trip, error isolation boundaries, custom types, and the async entry point.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use url::Url;

use rsskit::{
    parse_feed, parse_feed_bytes, parse_feed_bytes_async, Category, Channel, Cloud, Element,
    Enclosure, FromXml, Image, Item, RssError, SkipDay, SkipDays, SkipHours, Source, TextInput,
};

/// A channel exercising every field the RSS 2.0 spec defines.
const FULL_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
    <title>Test Channel</title>
    <link>https://www.duckduckgo.com</link>
    <description>Test RSS Channel</description>
    <language>en_us</language>
    <copyright>2019, Me</copyright>
    <managingEditor>Someone</managingEditor>
    <webMaster>Someone Else</webMaster>
    <pubDate>Sat, 07 Sep 2002 00:00:01 GMT</pubDate>
    <lastBuildDate>Sat, 07 Sep 2002 00:00:02 GMT</lastBuildDate>
    <category domain="http://www.ddg.com">Duck Duck Go</category>
    <category domain="http://www.google.com">Google</category>
    <generator>A Generator</generator>
    <docs>https://www.bing.com</docs>
    <cloud domain="radio.xmlstoragesystem.com" port="80" path="/RPC2" registerProcedure="xmlStorageSystem.rssPleaseNotify" protocol="xml-rpc" />
    <ttl>60</ttl>
    <image>
        <url>https://upload.wikimedia.org/wikipedia/fi/8/88/DuckDuckGo_logo.svg</url>
        <title>Duck Duck Go</title>
        <link>https://www.ddg.com</link>
        <width>200</width>
        <height>100</height>
        <description>DDG Search Engine</description>
    </image>
    <rating>A PICS rating</rating>
    <textInput>
        <title>Search</title>
        <description>Search Google</description>
        <name>q</name>
        <link>http://www.google.com/search?</link>
    </textInput>
    <skipHours>
        <hour>0</hour><hour>1</hour><hour>2</hour><hour>3</hour><hour>4</hour>
        <hour>5</hour><hour>6</hour><hour>7</hour><hour>8</hour><hour>9</hour>
        <hour>10</hour><hour>11</hour><hour>12</hour><hour>13</hour><hour>14</hour>
        <hour>15</hour><hour>16</hour><hour>17</hour><hour>18</hour><hour>19</hour>
        <hour>20</hour><hour>21</hour><hour>22</hour><hour>23</hour>
    </skipHours>
    <skipDays>
        <day>Sunday</day><day>Monday</day><day>Tuesday</day><day>Wednesday</day>
        <day>Thursday</day><day>Friday</day><day>Saturday</day>
    </skipDays>
    <item>
        <title>RSS Item Title</title>
        <link>https://www.duckduckgo.com</link>
        <description>An RSS Item</description>
        <author>The Author</author>
        <category domain="http://www.ddg.com">Duck Duck Go</category>
        <comments>http://www.ddg.com</comments>
        <enclosure url="http://www.scripting.com/mp3s/weatherReportSuite.mp3" length="12216320" type="audio/mpeg" />
        <guid>AGuid</guid>
        <pubDate>Sat, 07 Sep 2002 00:00:01 GMT</pubDate>
        <source url="http://www.tomalak.org/links2.xml">Tomalak's Realm</source>
    </item>
</channel>
</rss>"#;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// The channel FULL_RSS describes, built by direct construction.
fn full_channel() -> Channel {
    Channel {
        title: "Test Channel".to_string(),
        link: url("https://www.duckduckgo.com"),
        description: "Test RSS Channel".to_string(),
        language: Some("en_us".to_string()),
        copyright: Some("2019, Me".to_string()),
        managing_editor: Some("Someone".to_string()),
        web_master: Some("Someone Else".to_string()),
        pub_date: Some(Utc.with_ymd_and_hms(2002, 9, 7, 0, 0, 1).unwrap()),
        last_build_date: Some(Utc.with_ymd_and_hms(2002, 9, 7, 0, 0, 2).unwrap()),
        category: vec![
            Category::new("Duck Duck Go", Some(url("http://www.ddg.com"))).unwrap(),
            Category::new("Google", Some(url("http://www.google.com"))).unwrap(),
        ],
        generator: Some("A Generator".to_string()),
        docs: Some(url("https://www.bing.com")),
        cloud: Some(Cloud {
            domain: "radio.xmlstoragesystem.com".to_string(),
            port: "80".to_string(),
            path: "/RPC2".to_string(),
            register_procedure: "xmlStorageSystem.rssPleaseNotify".to_string(),
            protocol: "xml-rpc".to_string(),
        }),
        ttl: Some(60),
        image: Some(Image {
            url: url("https://upload.wikimedia.org/wikipedia/fi/8/88/DuckDuckGo_logo.svg"),
            title: "Duck Duck Go".to_string(),
            link: url("https://www.ddg.com"),
            width: Some(200),
            height: Some(100),
            description: Some("DDG Search Engine".to_string()),
        }),
        rating: Some("A PICS rating".to_string()),
        text_input: Some(TextInput {
            title: "Search".to_string(),
            description: "Search Google".to_string(),
            name: "q".to_string(),
            link: url("http://www.google.com/search?"),
        }),
        skip_hours: Some(SkipHours::new((0..=23).collect()).unwrap()),
        skip_days: Some(SkipDays {
            days: SkipDay::ALL.into_iter().collect(),
        }),
    }
}

fn full_item() -> Item {
    Item {
        title: Some("RSS Item Title".to_string()),
        link: Some(url("https://www.duckduckgo.com")),
        description: Some("An RSS Item".to_string()),
        author: Some("The Author".to_string()),
        category: vec![Category::new("Duck Duck Go", Some(url("http://www.ddg.com"))).unwrap()],
        comments: Some(url("http://www.ddg.com")),
        enclosure: Some(Enclosure {
            url: url("http://www.scripting.com/mp3s/weatherReportSuite.mp3"),
            length: 12216320,
            mime_type: "audio/mpeg".to_string(),
        }),
        guid: Some("AGuid".to_string()),
        pub_date: Some(Utc.with_ymd_and_hms(2002, 9, 7, 0, 0, 1).unwrap()),
        source: Some(
            Source::new("Tomalak's Realm", url("http://www.tomalak.org/links2.xml")).unwrap(),
        ),
    }
}

#[test]
fn test_full_fixture_round_trip() {
    let feed = parse_feed_bytes(FULL_RSS.as_bytes()).unwrap();
    assert_eq!(feed.channel, full_channel());
    assert_eq!(feed.items, vec![full_item()]);
}

#[test]
fn test_empty_channel_fails() {
    let result = parse_feed_bytes(b"<channel>\n</channel>");
    assert!(result.is_err());
}

#[test]
fn test_empty_input_fails() {
    assert!(matches!(
        parse_feed_bytes(b""),
        Err(RssError::EmptyDocument)
    ));
}

/// One well-formed item and one whose enclosure is missing its url attribute:
/// the enclosure degrades to absent but the item itself survives.
#[test]
fn test_malformed_enclosure_degrades_field_not_item() {
    let rss = r#"<rss version="2.0"><channel>
        <title>T</title><link>http://x.com</link><description>D</description>
        <item>
            <title>Good</title>
            <enclosure url="http://cdn/ep1.mp3" length="100" type="audio/mpeg"/>
        </item>
        <item>
            <title>Degraded</title>
            <enclosure length="100" type="audio/mpeg"/>
        </item>
    </channel></rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes()).unwrap();
    assert_eq!(feed.items.len(), 2);
    assert!(feed.items[0].enclosure.is_some());
    assert_eq!(feed.items[1].title.as_deref(), Some("Degraded"));
    assert_eq!(feed.items[1].enclosure, None);
}

/// An item type with a required title, to exercise the per-item error
/// isolation boundary of the feed aggregator.
#[derive(Debug, PartialEq)]
struct TitledItem {
    title: String,
}

impl FromXml for TitledItem {
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        let title = element
            .child("title")
            .map(|el| el.text().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(RssError::EmptyValue("title"))?;
        Ok(TitledItem { title })
    }
}

#[test]
fn test_failing_items_dropped_not_fatal() {
    let rss = r#"<rss version="2.0"><channel>
        <title>T</title><link>http://x.com</link><description>D</description>
        <item><title>Kept</title></item>
        <item><guid>untitled</guid></item>
        <item><title>Also kept</title></item>
    </channel></rss>"#;

    let feed = parse_feed::<Channel, TitledItem>(rss.as_bytes()).unwrap();
    assert_eq!(
        feed.items,
        vec![
            TitledItem { title: "Kept".to_string() },
            TitledItem { title: "Also kept".to_string() },
        ]
    );
}

#[tokio::test]
async fn test_async_entry_point_matches_sync() {
    let sync_feed = parse_feed_bytes(FULL_RSS.as_bytes()).unwrap();
    let async_feed = parse_feed_bytes_async(FULL_RSS.as_bytes().to_vec())
        .await
        .unwrap();
    assert_eq!(async_feed, sync_feed);
}

#[tokio::test]
async fn test_async_entry_point_propagates_errors() {
    assert!(parse_feed_bytes_async(Vec::new()).await.is_err());
}

#[test]
fn test_feed_serializes_to_json() {
    let feed = parse_feed_bytes(FULL_RSS.as_bytes()).unwrap();
    let json = serde_json::to_value(&feed).unwrap();
    assert_eq!(json["channel"]["title"], "Test Channel");
    assert_eq!(json["items"][0]["guid"], "AGuid");
}
