// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn send_alert_never_fails() {
    let sink = TracingAlertSink;
    assert!(sink.send_alert(1, -1.5).await.is_ok());
}
