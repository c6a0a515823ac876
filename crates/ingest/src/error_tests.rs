// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::response::IntoResponse;

use super::*;

#[test]
fn bad_request_maps_to_400() {
    let resp = IngestError::BadRequest("nope".to_owned()).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn queue_error_maps_to_503() {
    let resp = IngestError::Queue(anyhow::anyhow!("down")).into_response();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
