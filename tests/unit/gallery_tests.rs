// Gallery pipeline tests
// Both image pipelines plus the page template, over in-memory assets

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::thread;
use watermark_preview::config::GalleryConfig;
use watermark_preview::gallery::{GalleryError, Pipeline};
use watermark_preview::watermark::WatermarkError;

use super::fixtures::*;

fn decode_payload(payload: &str) -> image::RgbaImage {
    let bytes = STANDARD.decode(payload).expect("payload is standard base64");
    image::load_from_memory(&bytes)
        .expect("payload decodes as an image")
        .to_rgba8()
}

// Test: A successful render embeds two base64 JPEGs in the template
#[test]
fn test_render_page_embeds_two_images() {
    let reader = default_assets();
    let response = default_gallery(&reader).render_page();

    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, "text/html; charset=utf-8");
    assert!(response.body.contains("<!DOCTYPE html>"));

    let payloads = data_uri_payloads(&response.body);
    assert_eq!(payloads.len(), 2);
    assert_eq!(response.body.matches("data:image/jpeg;base64,").count(), 2);

    for payload in &payloads {
        let bytes = STANDARD.decode(payload).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8], "JPEG SOI marker");

        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (BASE_WIDTH, BASE_HEIGHT));
    }
}

// Test: Image1 carries the bitmap watermark at the center
#[test]
fn test_image1_has_centered_watermark() {
    let reader = default_assets();
    let images = default_gallery(&reader).render_images().unwrap();
    let img = decode_payload(&images.image1);

    // 40x20 red mark centered on 320x240 covers (140..180, 110..130)
    let center = img.get_pixel(160, 120);
    assert!(center[0] > 200 && center[1] < 60 && center[2] < 60, "center = {:?}", center);

    let corner = img.get_pixel(10, 10);
    for c in 0..3 {
        assert!((corner[c] as i16 - 128).abs() < 10, "corner = {:?}", corner);
    }
}

// Test: Image2 carries the text watermark and keeps the base elsewhere
#[test]
fn test_image2_has_text_watermark() {
    let reader = default_assets();
    let images = default_gallery(&reader).render_images().unwrap();
    let img = decode_payload(&images.image2);

    // Yellow text at 0.6 opacity over gray brightens red and green
    let touched = img
        .pixels()
        .filter(|p| p[0] > 170 && p[1] > 170 && p[2] < 110)
        .count();
    assert!(touched > 50, "only {} watermark pixels", touched);

    let corner = img.get_pixel(2, 2);
    for c in 0..3 {
        assert!((corner[c] as i16 - 128).abs() < 10, "corner = {:?}", corner);
    }
}

// Test: PNG output is embedded when configured
#[test]
fn test_png_output_format() {
    let reader = default_assets();
    let config = GalleryConfig {
        output_format: "png".to_string(),
        ..GalleryConfig::default()
    };
    let gallery = gallery_with(config, &reader);
    let images = gallery.render_images().unwrap();

    assert_eq!(images.content_type, "image/png");
    assert!(images.image1.starts_with("iVBORw0KGgo"));
    assert!(images.image2.starts_with("iVBORw0KGgo"));

    // The page labels the payloads with the PNG MIME type
    let body = gallery.render_page().body;
    assert_eq!(body.matches("data:image/png;base64,iVBORw0KGgo").count(), 2);
    assert!(!body.contains("image/jpeg"));

    // Lossless: untouched corners are the exact decoded base color
    let img = decode_payload(&images.image1);
    let base = image::load_from_memory(&jpeg_bytes(base_photo()))
        .unwrap()
        .to_rgba8();
    assert_eq!(img.get_pixel(0, 0), base.get_pixel(0, 0));
}

// Test: An unsupported format slipping past validation renders empty images
#[test]
fn test_unsupported_format_renders_empty_payloads() {
    let reader = default_assets();
    let config = GalleryConfig {
        output_format: "gif".to_string(),
        ..GalleryConfig::default()
    };
    let response = gallery_with(config, &reader).render_page();

    assert_eq!(response.status, 200);
    assert_eq!(data_uri_payloads(&response.body), vec!["", ""]);
}

// Test: Empty watermark path leaves Image1 as the plain base photo
#[test]
fn test_empty_watermark_path_is_noop() {
    let reader = default_assets();
    let mut config = GalleryConfig {
        output_format: "png".to_string(),
        ..GalleryConfig::default()
    };
    config.graphical.watermark = String::new();

    let images = gallery_with(config, &reader).render_images().unwrap();
    let img = decode_payload(&images.image1);
    let base = image::load_from_memory(&jpeg_bytes(base_photo()))
        .unwrap()
        .to_rgba8();
    assert_eq!(img, base);
}

// Test: Text opacity 0 leaves Image2 identical to the base photo
#[test]
fn test_zero_text_opacity_is_noop() {
    let reader = default_assets();
    let mut config = GalleryConfig {
        output_format: "png".to_string(),
        ..GalleryConfig::default()
    };
    config.text.opacity = 0.0;

    let images = gallery_with(config, &reader).render_images().unwrap();
    let img = decode_payload(&images.image2);
    let base = image::load_from_memory(&jpeg_bytes(base_photo()))
        .unwrap()
        .to_rgba8();
    assert_eq!(img, base);
}

// Test: Missing base photo fails the graphical pipeline with NotFound
#[test]
fn test_missing_base_image() {
    let reader = default_assets();
    reader.remove("image.jpg");

    let err = default_gallery(&reader).render_images().unwrap_err();
    assert!(matches!(
        err,
        GalleryError::Watermark {
            pipeline: Pipeline::Graphical,
            source: WatermarkError::NotFound(_),
        }
    ));
}

// Test: Missing font fails the text pipeline and the page is a static 500
#[test]
fn test_missing_font_is_scoped_500() {
    let reader = default_assets();
    reader.remove("Nunito-Medium.ttf");
    let gallery = default_gallery(&reader);

    let err = gallery.render_images().unwrap_err();
    assert!(matches!(
        err,
        GalleryError::Watermark {
            pipeline: Pipeline::Text,
            ..
        }
    ));

    let response = gallery.render_page();
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "Error rendering images");
    assert!(!response.body.contains("Nunito"));
}

// Test: Corrupt font is a FontLoadError
#[test]
fn test_corrupt_font() {
    let reader = default_assets();
    reader.insert("Nunito-Medium.ttf", b"definitely not a font".to_vec());

    let err = default_gallery(&reader).render_images().unwrap_err();
    assert!(matches!(
        err,
        GalleryError::Watermark {
            source: WatermarkError::FontLoadError(_),
            ..
        }
    ));
}

// Test: Corrupt watermark bitmap is a DecodeError
#[test]
fn test_corrupt_watermark_bitmap() {
    let reader = default_assets();
    reader.insert("FG-copyright-mini.png", vec![0x89, b'P', b'N', b'G', 0, 0]);

    let err = default_gallery(&reader).render_images().unwrap_err();
    assert!(matches!(
        err,
        GalleryError::Watermark {
            pipeline: Pipeline::Graphical,
            source: WatermarkError::DecodeError(_),
        }
    ));
}

// Test: Read failures surface as ReadError and a 500
#[test]
fn test_io_error_is_500() {
    let reader = default_assets();
    reader.set_io_error(true);
    let gallery = default_gallery(&reader);

    assert!(matches!(
        gallery.render_images(),
        Err(GalleryError::Watermark {
            source: WatermarkError::ReadError(_),
            ..
        })
    ));
    assert_eq!(gallery.render_page().status, 500);
}

// Test: Missing template is "Error loading template"
#[test]
fn test_missing_template() {
    let reader = default_assets();
    reader.remove("templates/images.html");

    let response = default_gallery(&reader).render_page();
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "Error loading template");
}

// Test: Malformed template is "Error loading template"
#[test]
fn test_malformed_template() {
    let reader = default_assets();
    reader.insert("templates/images.html", b"<img src=\"{{.Image1\">".to_vec());

    let response = default_gallery(&reader).render_page();
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "Error loading template");
}

// Test: Template referencing an unknown slot is "Error executing template"
#[test]
fn test_template_with_unknown_slot() {
    let reader = default_assets();
    reader.insert(
        "templates/images.html",
        b"{{.Image1}} {{.Image2}} {{.Image3}}".to_vec(),
    );

    let response = default_gallery(&reader).render_page();
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "Error executing template");
}

// Test: Image errors take precedence over template errors
#[test]
fn test_images_render_before_template() {
    let reader = default_assets();
    reader.remove("templates/images.html");
    reader.remove("zerkalo-ozera.jpg");

    let response = default_gallery(&reader).render_page();
    assert_eq!(response.body, "Error rendering images");
}

// Test: Assets are re-read on every request
#[test]
fn test_assets_are_not_cached() {
    let reader = default_assets();
    let gallery = default_gallery(&reader);

    let first = gallery.render_images().unwrap();

    reader.insert(
        "FG-copyright-mini.png",
        png_bytes(image::RgbaImage::from_pixel(
            40,
            20,
            image::Rgba([0, 0, 255, 255]),
        )),
    );
    let second = gallery.render_images().unwrap();

    assert_ne!(first.image1, second.image1);
    assert_eq!(first.image2, second.image2);

    let center = *decode_payload(&second.image1).get_pixel(160, 120);
    assert!(center[2] > 200 && center[0] < 60, "center = {:?}", center);
}

// Test: Concurrent renders share nothing mutable and agree
#[test]
fn test_concurrent_renders_are_independent() {
    let reader = default_assets();
    let gallery = default_gallery(&reader);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gallery = gallery.clone();
            thread::spawn(move || gallery.render_page())
        })
        .collect();

    let responses: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for response in &responses {
        assert_eq!(response.status, 200);
        assert_eq!(response.body, responses[0].body);
    }
}
