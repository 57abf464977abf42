#![allow(clippy::expect_used, clippy::unwrap_used)]

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DEFAULT_PATHS: [&str; 3] = [
    "/favicon.ico",
    "/apple-touch-icon.png",
    "/apple-touch-icon-precomposed.png",
];

/// Encode a blank `width` x `height` image in `format`.
pub fn image_bytes(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("encode fixture image");
    buffer
}

pub fn ico() -> Vec<u8> {
    image_bytes(ImageFormat::Ico, 16, 16)
}

pub fn png() -> Vec<u8> {
    image_bytes(ImageFormat::Png, 32, 32)
}

/// Serve `html` as the page at `/`.
pub async fn serve_page(server: &MockServer, html: &str) {
    serve_page_at(server, "/", html).await;
}

pub async fn serve_page_at(server: &MockServer, at: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .set_body_string(html),
        )
        .mount(server)
        .await;
}

/// Serve raw bytes at `at` with a deliberately unhelpful content type.
pub async fn serve_bytes(server: &MockServer, at: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/octet-stream")
                .set_body_bytes(body),
        )
        .mount(server)
        .await;
}

/// Serve an icon at each default path.
#[allow(dead_code)]
pub async fn serve_defaults(server: &MockServer) {
    serve_bytes(server, DEFAULT_PATHS[0], ico()).await;
    serve_bytes(server, DEFAULT_PATHS[1], png()).await;
    serve_bytes(server, DEFAULT_PATHS[2], png()).await;
}

/// Icon page with the given hrefs declared as `rel` links.
#[allow(dead_code)]
pub fn page_with(links: &[(&str, &str)]) -> String {
    let tags: String = links
        .iter()
        .map(|(rel, href)| format!(r#"<link rel="{rel}" href="{href}">"#))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<html><head><title>t</title>\n{tags}\n</head><body></body></html>")
}
