#![allow(dead_code)]

pub mod mocks;

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::header;
use axum::response::Response;

pub const HEADER: &str = "__Timing_Header__";
pub const FOOTER: &str = "__Timing_Footer__";

pub fn get(uri: &str) -> Request {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn html_response(content_type: &str, body: &str) -> Response {
    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
