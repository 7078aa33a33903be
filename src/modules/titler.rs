//! Module that shows the title and description of web pages posted in a channel, and some details
//! about images and other files.

#![deny(unsafe_code)]
#![deny(missing_docs)]

extern crate async_trait;

use std::io::Cursor;
use std::time;

use image::{AnimationDecoder, ImageDecoder, ImageFormat, ImageReader};
use irc::proto::Command;
use regex::{Captures, Regex};
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Url;

use crate::util::format::{bold, colour, italic, Colour};
use crate::util::is_public;
use crate::{
    BotCommand,
    BotCommandResult,
    BotConfig,
    BotListener,
    BotParameters,
    BotResponse,
    http,
};

const FETCH_TIMEOUT: time::Duration = time::Duration::from_secs(4);
static TINYURL_URL: &str = "http://tinyurl.com";

// only this much of a page is searched for its title and description
const MAX_PAGE_BYTES: usize = 512 * 1024;
const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

const BAD_EXTENSIONS: &[&str] = &[".bmp", ".flv", ".m3u8"];

const SHORTENERS: &[&str] = &[
    "adf.ly",
    "bit.do",
    "bit.ly",
    "bitly.com",
    "budurl.com",
    "cli.gs",
    "fa.by",
    "goo.gl",
    "is.gd",
    "j.mp",
    "lurl.no",
    "lnkd.in",
    "moourl.com",
    "ow.ly",
    "smallr.com",
    "snipr.com",
    "snipurl.com",
    "snurl.com",
    "su.pr",
    "t.co",
    "tiny.cc",
    "tr.im",
    "tinyurl.com",
];

// sites whose descriptions are boilerplate
const NO_DESCRIPTION: &[&str] = &[
    "twitter.com",
    "panoramio.com",
    "facebook.com",
    "kickass.to",
    "dailymotion.com",
    "tinypic.com",
    "ebay.com",
    "imgur.com",
    "dropbox.com",
];

lazy_static! {
    static ref CLIENT: reqwest::Client = http::client(FETCH_TIMEOUT);
    static ref URL_RE: Regex = Regex::new(r#"https?://[^\s<>"]+"#).unwrap();
    static ref TITLE_RE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").unwrap();
    static ref META_RE: Regex = Regex::new(r"(?is)<meta\s[^>]*>").unwrap();
    static ref ATTRIBUTE_RE: Regex =
        Regex::new(r#"(?is)([a-z-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap();
    static ref ENTITY_RE: Regex = Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap();
}

/// What the bot has to say about a URL.
#[derive(Debug, PartialEq)]
enum Summary {
    /// A text page with a title (already followed by a link) and maybe a description.
    Page {
        title: String,
        description: Option<String>,
    },
    /// Image details, file details or an error.
    Info(String),
}

struct Titler {
    config: BotConfig,
    client: reqwest::Client,
    tinyurl: String,
}

struct TitlerCommand(Titler);

struct UrlListener(Titler);

/**
 * Factory function that will create instances of all implemented commands in this module.
 */
pub fn mk(config: &BotConfig) -> Vec<Box<dyn BotCommand>> {
    vec![Box::new(TitlerCommand(Titler::new(config, CLIENT.clone(), TINYURL_URL)))]
}

/**
 * Factory function that will create the listener watching channels for URLs.
 */
pub fn mk_listeners(config: &BotConfig) -> Vec<Box<dyn BotListener>> {
    vec![Box::new(UrlListener(Titler::new(config, CLIENT.clone(), TINYURL_URL)))]
}

fn on_list(host: &str, domains: &[&str]) -> bool {
    domains
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

fn kilobytes(bytes: u64) -> u64 {
    bytes / 1024
}

/// Read at most `cap` bytes of the body; the rest is never downloaded.
async fn read_capped(mut response: reqwest::Response, cap: usize) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = cap - body.len();
        body.extend_from_slice(&chunk[..chunk.len().min(room)]);
        if body.len() >= cap {
            break;
        }
    }
    Ok(body)
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE.replace_all(text, |caps: &Captures| {
        let entity = &caps[1];
        let decoded = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
            u32::from_str_radix(hex, 16).ok().and_then(std::char::from_u32)
        } else if let Some(decimal) = entity.strip_prefix('#') {
            decimal.parse().ok().and_then(std::char::from_u32)
        } else {
            match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => None,
            }
        };
        decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
    }).into_owned()
}

fn clean_title(raw: &str) -> String {
    let printable: String = decode_entities(raw)
        .chars()
        .filter(|c| !c.is_control())
        .collect();
    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn page_title(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .map(|caps| clean_title(&caps[1]))
        .filter(|title| !title.is_empty())
}

fn page_description(html: &str) -> Option<String> {
    META_RE
        .find_iter(html)
        .find_map(|tag| {
            let mut name = None;
            let mut content = None;
            for caps in ATTRIBUTE_RE.captures_iter(tag.as_str()) {
                let value = caps.get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map_or("", |m| m.as_str());
                match caps[1].to_lowercase().as_str() {
                    "name" => name = Some(value),
                    "content" => content = Some(value),
                    _ => (),
                }
            }
            if name?.eq_ignore_ascii_case("description") {
                content
            } else {
                None
            }
        })
        .map(|content| decode_entities(content.trim()).replace(|c: char| c == '\n' || c == '\r', ""))
        .filter(|description| !description.is_empty())
}

fn is_animated(body: &[u8]) -> bool {
    image::codecs::gif::GifDecoder::new(Cursor::new(body))
        .map(|decoder| decoder.into_frames().take(2).filter(|frame| frame.is_ok()).count() > 1)
        .unwrap_or(false)
}

fn colour_mode(color_type: image::ColorType) -> String {
    use image::ColorType::*;

    match color_type {
        L8 | L16 => "L",
        La8 | La16 => "LA",
        Rgb8 | Rgb16 | Rgb32F => "RGB",
        Rgba8 | Rgba16 | Rgba32F => "RGBA",
        other => return format!("{:?}", other),
    }.to_string()
}

fn image_info(url: &str, body: &[u8], size: u64) -> String {
    let described = ImageReader::new(Cursor::new(body))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)
        .and_then(|reader| {
            let format = reader.format();
            let decoder = reader.into_decoder()?;
            Ok((format, decoder.dimensions(), decoder.color_type()))
        });

    match described {
        Err(err) =>
            format!("ERROR: {} is an invalid image I cannot read. [{}]", url, err),
        Ok((format, (width, height), color_type)) => {
            let kind = match format {
                Some(ImageFormat::Gif) if is_animated(body) => "Animated GIF".to_string(),
                Some(format) => format!("{:?}", format).to_uppercase(),
                None => "unknown".to_string(),
            };
            format!("Image type: {}  Dimensions: {}x{}  Mode: {}  Size: {}Kb",
                kind, width, height, colour_mode(color_type), kilobytes(size))
        },
    }
}

/// The text of a PRIVMSG, with CTCP ACTIONs unwrapped and other CTCP requests dropped.
fn action_text(text: &str) -> Option<&str> {
    if !text.starts_with('\x01') {
        return Some(text);
    }
    text.strip_prefix("\x01ACTION ").map(|rest| rest.trim_end_matches('\x01'))
}

fn render(target: &str, summary: Summary) -> BotResponse {
    let label = |text: &str| bold(&colour(text, Colour::Teal));
    match summary {
        Summary::Page { title, description: None } =>
            BotResponse::Privmsg(target.to_string(), format!("{}{}", label("TITLE: "), title)),
        Summary::Page { title, description: Some(description) } =>
            BotResponse::Many(vec![
                BotResponse::Privmsg(target.to_string(), format!("{}{}", label("TITLE: "), title)),
                BotResponse::Privmsg(target.to_string(), format!("{}{}", label("DESC : "), description)),
            ]),
        Summary::Info(text) =>
            BotResponse::Privmsg(target.to_string(), format!("{}{}", bold(&italic("Response: ")), text)),
    }
}

impl Titler {
    fn new(config: &BotConfig, client: reqwest::Client, tinyurl: &str) -> Titler {
        Titler {
            config: config.clone(),
            client,
            tinyurl: tinyurl.trim_end_matches('/').to_string(),
        }
    }

    async fn summarize(&self, url: &str) -> Option<Summary> {
        if let Some(extension) = BAD_EXTENSIONS.iter().find(|extension| url.ends_with(*extension)) {
            return Some(Summary::Info(format!("ERROR. Bad extension '{}'", extension)));
        }

        debug!("titler: fetching {}", url);
        let response = match self.client
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-us,en;q=0.5")
            .send()
            .await
        {
            Ok(response) =>
                response,
            Err(err) =>
                return Some(Summary::Info(format!(
                    "We failed to reach a server. Reason: {}", err.without_url()))),
        };

        let status = response.status();
        if !status.is_success() {
            return Some(Summary::Info(format!(
                "The server couldn't fulfill the request: {}", status.as_u16())));
        }

        let content_type = response.headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_lowercase())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let content_length = response.headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        let cap = if content_type.starts_with("image/") {
            MAX_IMAGE_BYTES
        } else if content_type.starts_with("text/") {
            MAX_PAGE_BYTES
        } else {
            let size = content_length.map_or_else(|| "unknown".to_string(), |size| format!("{}Kb", kilobytes(size)));
            return Some(Summary::Info(format!("Content type: {} - Size: {}", content_type, size)));
        };

        let body = match read_capped(response, cap).await {
            Ok(body) =>
                body,
            Err(err) =>
                return Some(Summary::Info(format!(
                    "We failed to reach a server. Reason: {}", err.without_url()))),
        };

        if content_type.starts_with("image/") {
            Some(Summary::Info(image_info(url, &body, content_length.unwrap_or(body.len() as u64))))
        } else {
            self.page(url, &body).await
        }
    }

    async fn page(&self, url: &str, body: &[u8]) -> Option<Summary> {
        let html = String::from_utf8_lossy(body);
        let title = page_title(&html)?;

        let host = Url::parse(url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_lowercase))
            .unwrap_or_default();
        let description = if on_list(&host, NO_DESCRIPTION) {
            None
        } else {
            page_description(&html)
        };
        let link = if on_list(&host, SHORTENERS) {
            self.expand(url).await
        } else {
            self.shorten(url).await
        };

        Some(Summary::Page {
            title: format!("{} - ({})", title, link),
            description,
        })
    }

    /// Follow the redirects of a short link to where it points.
    async fn expand(&self, url: &str) -> String {
        match self.client.head(url).send().await {
            Ok(response) =>
                response.url().to_string(),
            Err(err) => {
                debug!("titler: failed to expand {}: {}", url, err);
                url.to_string()
            },
        }
    }

    async fn shorten(&self, url: &str) -> String {
        let request = match Url::parse_with_params(&format!("{}/api-create.php", self.tinyurl), &[("url", url)]) {
            Ok(request) => request,
            Err(_) => return url.to_string(),
        };

        let response = self.client.get(request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);
        match response {
            Ok(response) => match response.text().await {
                Ok(short) if !short.trim().is_empty() => short.trim().to_string(),
                _ => url.to_string(),
            },
            Err(err) => {
                debug!("titler: failed to shorten {}: {}", url, err.without_url());
                url.to_string()
            },
        }
    }
}

#[async_trait::async_trait]
impl BotCommand for TitlerCommand {
    fn trigger(&self) -> &'static str {
        "titler"
    }

    async fn handle(&self, params: BotParameters) -> BotCommandResult {
        let response_target = params.response_target()?;

        match params.args.get(0) {
            None =>
                Ok(BotResponse::Privmsg(
                    response_target,
                    format!("Usage: {}titler <url>", params.leader))),
            Some(url) =>
                Ok(self.0
                    .summarize(url)
                    .await
                    .map_or(BotResponse::Ignore, |summary| render(&response_target, summary))),
        }
    }
}

#[async_trait::async_trait]
impl BotListener for UrlListener {
    fn name(&self) -> &'static str {
        "titler"
    }

    async fn hear(&self, params: BotParameters) -> BotCommandResult {
        let (target, text) = match params.message.command {
            Command::PRIVMSG(ref target, ref text) => (target.clone(), text.clone()),
            _ => return Ok(BotResponse::Ignore),
        };
        if !is_public(&target) || !self.0.config.is_enabled("titler", &target, false) {
            return Ok(BotResponse::Ignore);
        }

        let urls: Vec<String> = match action_text(&text) {
            Some(text) => URL_RE.find_iter(text).map(|m| m.as_str().to_string()).collect(),
            None => return Ok(BotResponse::Ignore),
        };

        let mut responses = Vec::new();
        for url in urls {
            if let Some(summary) = self.0.summarize(&url).await {
                responses.push(render(&target, summary));
            }
        }

        Ok(match responses.len() {
            0 => BotResponse::Ignore,
            1 => responses.remove(0),
            _ => BotResponse::Many(responses),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::util::format::strip;
    use crate::util::Hostmasks;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    static PAGE: &str = "<html><head>\n\
        <title>\n  Hello &amp; welcome\t</title>\n\
        <meta property=\"og:title\" content=\"ignored\">\n\
        <meta name=\"Description\" content=\"A page\r\n for tests &#8211; really\">\n\
        </head><body></body></html>";

    fn titler(mock_server: &MockServer, channels: &str) -> Titler {
        let mut options = HashMap::new();
        options.insert("titler.channels".to_string(), channels.to_string());
        Titler::new(&BotConfig::from_options(&options), http::client(FETCH_TIMEOUT), &mock_server.uri())
    }

    fn params(line: &str) -> BotParameters {
        BotParameters {
            message: line.parse().unwrap(),
            leader: "&".to_string(),
            args: vec![],
            hostmasks: Arc::new(Hostmasks::default()),
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Vec::new();
        image::RgbImage::new(width, height)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn gif(frames: usize) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut encoder = image::codecs::gif::GifEncoder::new(&mut buffer);
            encoder
                .encode_frames((0..frames).map(|_| image::Frame::new(image::RgbaImage::new(2, 2))))
                .unwrap();
        }
        buffer
    }

    #[test]
    fn test_titles() {
        assert_eq!(page_title(PAGE).as_deref(), Some("Hello & welcome"));
        assert_eq!(page_title("<title>  </title>"), None);
        assert_eq!(page_title("<html></html>"), None);
        assert_eq!(clean_title("a\x07b  \n c"), "ab c");
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(page_description(PAGE).as_deref(), Some("A page for tests \u{2013} really"));
        assert_eq!(page_description("<meta name='description' content=''>"), None);
        assert_eq!(page_description("<meta content=x name=description>").as_deref(), Some("x"));
    }

    #[test]
    fn test_entities() {
        assert_eq!(decode_entities("&lt;b&gt; &quot;x&quot; &#x41;&#66; &bogus;"), "<b> \"x\" AB &bogus;");
    }

    #[test]
    fn test_domain_lists() {
        assert!(on_list("bit.ly", SHORTENERS));
        assert!(on_list("www.imgur.com", NO_DESCRIPTION));
        assert!(!on_list("reddit.com", SHORTENERS));
    }

    #[test]
    fn test_action_text() {
        assert_eq!(action_text("see http://x"), Some("see http://x"));
        assert_eq!(action_text("\x01ACTION shares http://x\x01"), Some("shares http://x"));
        assert_eq!(action_text("\x01VERSION\x01"), None);
    }

    #[test]
    fn test_images() {
        assert_eq!(
            image_info("http://x/a.png", &png(3, 2), 2048),
            "Image type: PNG  Dimensions: 3x2  Mode: RGB  Size: 2Kb");
        assert!(image_info("http://x/a.gif", &gif(2), 10).starts_with("Image type: Animated GIF  Dimensions: 2x2"));
        assert!(image_info("http://x/a.gif", &gif(1), 10).starts_with("Image type: GIF  Dimensions: 2x2"));
        assert!(image_info("http://x/a.png", b"not an image", 12)
            .starts_with("ERROR: http://x/a.png is an invalid image I cannot read."));
    }

    #[test]
    fn test_render() {
        let summary = Summary::Page { title: "T".to_string(), description: Some("D".to_string()) };
        match render("#links", summary) {
            BotResponse::Many(responses) => {
                assert_eq!(responses.len(), 2);
                assert_eq!(responses[1], BotResponse::Privmsg("#links".to_string(), "\x02\x0310DESC : \x03\x02D".to_string()));
            },
            other => panic!("expected two lines, got {:?}", other),
        }
        match render("#links", Summary::Info("Content type: application/pdf - Size: 1Kb".to_string())) {
            BotResponse::Privmsg(_, text) => assert_eq!(strip(&text), "Response: Content type: application/pdf - Size: 1Kb"),
            other => panic!("expected one line, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_page_is_shortened() {
        let mock_server = MockServer::start().await;
        let page_url = format!("{}/page", mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html; charset=utf-8"))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api-create.php"))
            .and(query_param("url", page_url.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string("https://tinyurl.com/abc123"))
            .mount(&mock_server)
            .await;

        let titler = titler(&mock_server, "#links");
        assert_eq!(
            titler.summarize(&page_url).await,
            Some(Summary::Page {
                title: "Hello & welcome - (https://tinyurl.com/abc123)".to_string(),
                description: Some("A page for tests \u{2013} really".to_string()),
            }));
    }

    #[tokio::test]
    async fn test_shortener_failure_keeps_url() {
        let mock_server = MockServer::start().await;
        let page_url = format!("{}/page", mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<title>Plain</title>", "text/html"))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api-create.php"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let titler = titler(&mock_server, "#links");
        assert_eq!(
            titler.summarize(&page_url).await,
            Some(Summary::Page { title: format!("Plain - ({})", page_url), description: None }));
    }

    #[tokio::test]
    async fn test_errors_and_files() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/paper.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 3000], "application/pdf"))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pixel"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(png(1, 1), "image/png"))
            .mount(&mock_server)
            .await;

        let titler = titler(&mock_server, "#links");
        let base = mock_server.uri();

        assert_eq!(
            titler.summarize(&format!("{}/missing", base)).await,
            Some(Summary::Info("The server couldn't fulfill the request: 404".to_string())));
        assert_eq!(
            titler.summarize(&format!("{}/paper.pdf", base)).await,
            Some(Summary::Info("Content type: application/pdf - Size: 2Kb".to_string())));
        assert_eq!(
            titler.summarize(&format!("{}/pixel", base)).await,
            Some(Summary::Info("Image type: PNG  Dimensions: 1x1  Mode: RGB  Size: 0Kb".to_string())));
        assert_eq!(
            titler.summarize(&format!("{}/clip.m3u8", base)).await,
            Some(Summary::Info("ERROR. Bad extension '.m3u8'".to_string())));
    }

    #[tokio::test]
    async fn test_bodies_are_capped() {
        let mock_server = MockServer::start().await;

        let mut big_page = b"<html><head><title>Big page</title></head><body>".to_vec();
        big_page.resize(2 * MAX_PAGE_BYTES, b' ');
        Mock::given(method("GET"))
            .and(path("/big"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(big_page, "text/html"))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bytes"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![7u8; 10_000], "text/plain"))
            .mount(&mock_server)
            .await;

        let response = reqwest::get(&format!("{}/bytes", mock_server.uri())).await.unwrap();
        assert_eq!(read_capped(response, 1000).await.unwrap(), vec![7u8; 1000]);
        let response = reqwest::get(&format!("{}/bytes", mock_server.uri())).await.unwrap();
        assert_eq!(read_capped(response, MAX_PAGE_BYTES).await.unwrap().len(), 10_000);

        let titler = titler(&mock_server, "#links");
        match titler.summarize(&format!("{}/big", mock_server.uri())).await {
            Some(Summary::Page { title, .. }) => assert!(title.starts_with("Big page - ("), "unexpected title {}", title),
            other => panic!("expected a page, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_listener() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/paper.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 1024], "application/pdf"))
            .mount(&mock_server)
            .await;

        let listener = UrlListener(titler(&mock_server, "#links"));
        let url = format!("{}/paper.pdf", mock_server.uri());

        let response = listener
            .hear(params(&format!(":nick!user@host PRIVMSG #links :\x01ACTION reads {}\x01", url)))
            .await
            .unwrap();
        match response {
            BotResponse::Privmsg(target, text) => {
                assert_eq!(target, "#links");
                assert_eq!(strip(&text), "Response: Content type: application/pdf - Size: 1Kb");
            },
            other => panic!("expected a reply, got {:?}", other),
        }

        let response = listener
            .hear(params(&format!(":nick!user@host PRIVMSG #rust :{}", url)))
            .await
            .unwrap();
        assert_eq!(response, BotResponse::Ignore);

        let response = listener
            .hear(params(":nick!user@host PRIVMSG #links :no links here"))
            .await
            .unwrap();
        assert_eq!(response, BotResponse::Ignore);
    }
}
