#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

fn config_home() -> &'static Path {
    static CONFIG_HOME: OnceLock<TempDir> = OnceLock::new();
    CONFIG_HOME
        .get_or_init(|| tempfile::tempdir().expect("failed to create config dir for tests"))
        .path()
}

/// A `grabicon` command isolated from the user's config and environment.
pub fn grabicon_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("grabicon"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("XDG_CONFIG_HOME", config_home());
    cmd.env("NO_COLOR", "1");
    for var in [
        "GRABICON_CONFIG",
        "GRABICON_TIMEOUT",
        "GRABICON_CONCURRENCY",
        "GRABICON_OUTPUT_FORMAT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

pub fn image_bytes(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("encode fixture image");
    buffer
}

/// A site with one declared PNG icon and a default ICO.
pub async fn icon_site() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><link rel="icon" href="/static/logo.png"></head></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/static/logo.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(image_bytes(ImageFormat::Png, 32, 32)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/favicon.ico"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(image_bytes(ImageFormat::Ico, 16, 16)),
        )
        .mount(&server)
        .await;
    server
}
