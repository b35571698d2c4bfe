mod common;

use common::init_logging;
use common::synthetic_image::{horizontal_ridges, loop_print};
use dermatoglyph::api::{
    handle_batch, handle_count_ridges, handle_count_ridges_multipart, handle_detect,
    handle_detect_multipart, ApiRequest, ApiResponse, CountRidgesRequest, DetectRequest,
    ImagePayload,
};
use dermatoglyph::image::io::encode_png;
use dermatoglyph::{FingerprintAnalyzer, ImageVariant, PatternType, Point};

fn png_of(gray: &dermatoglyph::image::GrayImageU8) -> Vec<u8> {
    encode_png(gray).expect("png encoding")
}

#[test]
fn detect_then_count_round_trip() {
    init_logging();
    let gray = loop_print(320, 336, (272.0, 96.0), (224.0, 144.0), (224.0, 256.0), 10.0);
    let png = png_of(&gray);
    let analyzer = FingerprintAnalyzer::default();

    let detect = DetectRequest::new(ImagePayload::from_bytes_base64(&png));
    let detected = handle_detect(&analyzer, &detect).unwrap();
    assert_eq!(detected.cores.len(), 1, "cores {:?}", detected.cores);
    assert_eq!(detected.deltas.len(), 1, "deltas {:?}", detected.deltas);
    assert!(detected.cores[0].distance(&Point::new(272.0, 96.0)) < 32.0);
    assert!(detected.deltas[0].distance(&Point::new(224.0, 256.0)) < 16.0);
    assert_eq!(detected.pattern_type, PatternType::Loop);
    let ridge_count = detected.ridge_count.expect("ridge count requested");
    assert!(ridge_count > 0);

    // Counting on the returned points reproduces the detect-time count.
    let request = CountRidgesRequest {
        image: ImagePayload::Bytes(png),
        image_type: ImageVariant::Filtered,
        cores: detected.cores.clone(),
        deltas: detected.deltas.clone(),
    };
    let counted = handle_count_ridges(&analyzer, &request).unwrap();
    assert_eq!(counted.total_count, ridge_count);
    assert_eq!(counted.pairs.len(), 1);
    assert_eq!(counted.pairs[0].core, detected.cores[0]);
    assert_eq!(counted.pairs[0].delta, detected.deltas[0]);
}

#[test]
fn detect_response_serializes_snake_case() {
    let gray = horizontal_ridges(200, 200, 4, 25, 50, 8);
    let request = DetectRequest {
        count_ridges: false,
        ..DetectRequest::new(ImagePayload::Bytes(png_of(&gray)))
    };
    let response = handle_detect(&FingerprintAnalyzer::default(), &request).unwrap();
    assert_eq!(response.pattern_type, PatternType::Arch);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["pattern_type"], "arch");
    assert_eq!(json["number_deltas"], 0);
    assert!(json.get("ridge_count").is_none());
}

#[test]
fn data_url_payload_is_accepted() {
    let gray = horizontal_ridges(64, 64, 1, 30, 50, 6);
    let b64 = match ImagePayload::from_bytes_base64(&png_of(&gray)) {
        ImagePayload::Base64(s) => s,
        other => panic!("unexpected {other:?}"),
    };
    let request: DetectRequest = serde_json::from_value(serde_json::json!({
        "image": format!("data:image/png;base64,{b64}"),
        "image_type": "raw"
    }))
    .unwrap();
    assert_eq!(request.image_type, ImageVariant::Raw);
    assert!(handle_detect(&FingerprintAnalyzer::default(), &request).is_ok());
}

fn multipart_body(boundary: &str, fields: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match filename {
            Some(f) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[test]
fn multipart_uploads_reach_both_operations() {
    init_logging();
    let png = png_of(&horizontal_ridges(400, 400, 8, 25, 50, 10));
    let content_type = "multipart/form-data; boundary=----dermatoglyph";
    let analyzer = FingerprintAnalyzer::default();

    let body = multipart_body(
        "----dermatoglyph",
        &[
            ("image_data", Some("finger.png"), png.as_slice()),
            ("image_type", None, &b"filtered"[..]),
            ("hand", None, &b"left"[..]),
        ],
    );
    let detected = handle_detect_multipart(&analyzer, content_type, &body).unwrap();
    assert_eq!(detected.pattern_type, PatternType::Arch);

    let body = multipart_body(
        "----dermatoglyph",
        &[
            ("image_data", Some("finger.png"), png.as_slice()),
            ("cores", None, &br#"[{"x": 200, "y": 0}]"#[..]),
            ("deltas", None, &br#"[{"x": 200, "y": 399}]"#[..]),
        ],
    );
    let counted = handle_count_ridges_multipart(&analyzer, content_type, &body).unwrap();
    assert!((7..=9).contains(&counted.total_count));
}

#[test]
fn batch_keeps_order_and_reports_errors() {
    let png = png_of(&horizontal_ridges(128, 128, 2, 25, 50, 8));
    let requests = vec![
        ApiRequest::Detect(DetectRequest::new(ImagePayload::Bytes(png.clone()))),
        ApiRequest::CountRidges(CountRidgesRequest {
            image: ImagePayload::Bytes(png.clone()),
            image_type: ImageVariant::Filtered,
            cores: vec![Point::new(10.0, 10.0)],
            deltas: vec![Point::new(500.0, 10.0)],
        }),
        ApiRequest::Detect(DetectRequest::new(ImagePayload::Base64("%%%".to_string()))),
        ApiRequest::CountRidges(CountRidgesRequest {
            image: ImagePayload::Bytes(png),
            image_type: ImageVariant::Filtered,
            cores: vec![Point::new(64.0, 1.0)],
            deltas: vec![Point::new(64.0, 120.0)],
        }),
    ];
    let responses = handle_batch(&FingerprintAnalyzer::default(), &requests);
    assert_eq!(responses.len(), 4);
    assert!(matches!(responses[0], ApiResponse::Detect(_)));
    let kinds: Vec<_> = responses
        .iter()
        .map(|r| serde_json::to_value(r).unwrap()["error"].clone())
        .collect();
    assert_eq!(kinds[1], "PointOutOfBoundsError");
    assert_eq!(kinds[2], "DecodeError");
    match &responses[3] {
        ApiResponse::CountRidges(c) => assert_eq!(c.total_count, 2),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn truncated_png_is_a_decode_error() {
    let mut png = png_of(&horizontal_ridges(64, 64, 1, 30, 50, 6));
    png.truncate(40);
    let err = handle_detect(
        &FingerprintAnalyzer::default(),
        &DetectRequest::new(ImagePayload::Bytes(png)),
    )
    .unwrap_err();
    assert_eq!(err.kind(), "DecodeError");
}
